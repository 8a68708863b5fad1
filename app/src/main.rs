use todo_app::{Config, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, "starting todo screen");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    Runner::new(&config, std::io::stdout()).run(stdin).await
}
