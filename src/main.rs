// --- Grade Inteligente - servidor de optimización ---

use gradeshift::config::ServerConfig;
use gradeshift::run_server;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    gradeshift::telemetry::init(&config.log_level);
    info!("=== Gerador de Grade Horária (API) ===");
    info!("catálogo: {}", config.catalog_path.display());
    run_server(config).await
}
