use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default; RUST_LOG=deep_search=debug shows dispatch and session transitions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deep_search=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    deep_search::cli::commands::run().await
}
