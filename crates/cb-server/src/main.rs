use cb_server::config::ServerConfig;
use cb_server::logging::init_tracing;
use cb_server::server::run_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cfg = ServerConfig::load()?;
    tracing::info!(
        listen_addr = %cfg.listen_addr,
        content_root = %cfg.content_root.display(),
        "coinbomb boot"
    );

    run_server(cfg).await?;
    Ok(())
}
