use dupecheck::infrastructure::config::ServerConfig;
use dupecheck::interfaces::http;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = ServerConfig::load().map_err(std::io::Error::other)?;
    http::start_server(config)?.await
}
