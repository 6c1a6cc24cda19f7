//! Scan the model catalog available to your API key.
//!
//! Lists every generation-capable model, and with a model argument fires a
//! one-line smoke test at it. Useful when the application reports 404s.
//!
//! # Usage
//! ```bash
//! cargo run --bin model_scan
//! cargo run --bin model_scan -- gemini-1.5-flash
//! ```

use std::sync::Arc;

use verdi::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let gateway = Arc::new(GeminiGateway::from_env()?);

    match gateway.list_models().await {
        Ok(models) => {
            let generation: Vec<_> =
                models.iter().filter(|m| m.supports_generation()).collect();

            println!("Connection successful, found {} models.", models.len());
            println!();
            println!("Models available to you:");
            if generation.is_empty() {
                println!("  (no generation-capable models; check your API key permissions)");
            }
            for model in &generation {
                println!("  {}", model.name);
            }
        }
        Err(e) => {
            eprintln!("Connection failed: {}", e);
            eprintln!();
            eprintln!("A 404 here usually means the API key is invalid or restricted.");
            return Err(e);
        }
    }

    if let Some(model) = std::env::args().nth(1) {
        println!();
        println!("Testing {}...", model);

        let broker = LlmBroker::new(gateway as Arc<dyn LlmGateway>);
        let request = GenerationRequest::text("Hello, are you working?");

        match broker.generate(&model, &request).await {
            Ok(text) => println!("Response: {}", text),
            Err(e) => eprintln!("Failed: {}", e),
        }
    }

    Ok(())
}
