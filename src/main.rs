use etymo_agent::config::ServerConfig;
use etymo_agent::guard;
use etymo_agent::server::EtymoServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    guard::install_panic_hook();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("etymo-agent: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let server = EtymoServer::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("etymo-agent: fatal error: {e}");
        std::process::exit(1);
    }
}
