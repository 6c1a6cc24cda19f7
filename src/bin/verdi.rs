//! Analyze a crop-leaf photo from the command line.
//!
//! # Usage
//! ```bash
//! cargo run --bin verdi -- path/to/leaf.jpg
//! ```
//!
//! # Requirements
//! - `GOOGLE_API_KEY` (or `GEMINI_API_KEY`) set in the environment or a `.env` file

use std::sync::Arc;

use verdi::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let image_path = std::env::args().nth(1).ok_or_else(|| {
        VerdiError::ConfigError("usage: verdi <image-path>".to_string())
    })?;

    let gateway: Arc<dyn LlmGateway> = Arc::new(GeminiGateway::from_env()?);
    let pipeline = AnalysisPipeline::new(gateway);

    let image = ImageData::from_path(&image_path)?;
    println!("Analyzing {}...", image_path);
    println!();

    let analysis = pipeline.run(image).await;

    println!("Connected to brain: {}", analysis.model);
    println!();
    println!("## Scout Report");
    println!("{}", analysis.diagnosis.text());
    println!();

    match &analysis.treatment {
        Some(treatment) => {
            println!("## Treatment Plan");
            println!("{}", treatment.text());
        }
        None => {
            println!("Treatment planning skipped: no diagnosis to work from.");
        }
    }

    Ok(())
}
