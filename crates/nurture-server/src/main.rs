//! Nurture: pregnancy guidance assistant server.

use std::path::PathBuf;
use std::sync::Arc;

use nurture_chat::{BackendConfig, ResponseGenerator};
use nurture_runtime::Assistant;
use nurture_store::JournalStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("NURTURE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("Nurture: pregnancy guidance assistant");
    println!();
    println!("Usage: nurture [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve           Start the server");
    println!("  check                    Probe the generation backend and report the provider");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  PORT                     HTTP port (default 5002)");
    println!("  NURTURE_DATA_DIR         Data directory (default ./data)");
    println!("  NURTURE_PROVIDER         auto | ollama | mock");
    println!("  OLLAMA_HOST              Generation backend address");
    println!("  NURTURE_MODEL            Generation model name");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("serve");

    match command {
        "serve" => {}
        "check" | "--check" => {
            let config = nurture_core::NurtureConfig::from_env(resolve_data_dir())?;
            let backend_config = BackendConfig::load(&config.data_paths.backend_config_file);
            let generator = ResponseGenerator::connect(backend_config).await;
            println!("Provider: {}", generator.provider());
            if let Some(model) = generator.model() {
                println!("Model:    {}", model);
            }
            std::process::exit(if generator.is_backend_available() { 0 } else { 1 });
        }
        "--help" | "-h" | "help" => {
            print_help();
            return Ok(());
        }
        other => {
            eprintln!("Unknown command: {}. Use 'nurture help' for usage.", other);
            std::process::exit(1);
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = nurture_core::NurtureConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = JournalStore::open(&config.data_paths.journals)
        .map_err(|e| anyhow::anyhow!("Failed to open journal store: {}", e))?;

    // Backend is probed once; the choice holds for the process lifetime.
    let backend_config = BackendConfig::load(&config.data_paths.backend_config_file);
    let generator = ResponseGenerator::connect(backend_config).await;

    let assistant = Assistant::new(generator, store);
    let state = Arc::new(AppState::new(config, assistant));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Nurture server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
