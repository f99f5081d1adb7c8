use datasweeper::infrastructure::server_config::ServerConfig;
use datasweeper::interfaces::http::start_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = ServerConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    tracing::info!(host = %config.host, port = config.port, "starting datasweeper");
    start_server(config)?.await
}
