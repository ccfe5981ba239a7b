use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use crate::algorithm::BackendKind;
use crate::config::{PolicyConfig, ServerConfig};
use crate::models::Catalog;
use crate::server_handlers::{catalog_handler, help_handler, optimize_csv_handler, optimize_handler, runs_handler};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Estado compartido (sólo lectura) entre peticiones.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub policy: PolicyConfig,
    pub backend: BackendKind,
    pub audit_db: Option<PathBuf>,
    /// Limita las resoluciones simultáneas al número de CPUs.
    pub solver_slots: Arc<Semaphore>,
}

impl AppState {
    pub fn new(catalog: Catalog, policy: PolicyConfig, backend: BackendKind, audit_db: Option<PathBuf>) -> Self {
        let procs = std::cmp::max(1, num_cpus::get());
        AppState {
            catalog: Arc::new(catalog),
            policy,
            backend,
            audit_db,
            solver_slots: Arc::new(Semaphore::new(procs)),
        }
    }
}

/// Registra todas las rutas. Separado para poder montarlo en tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog", web::get().to(catalog_handler))
        .route("/optimize", web::post().to(optimize_handler))
        .route("/optimize/csv", web::post().to(optimize_csv_handler))
        .route("/runs", web::get().to(runs_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let catalog = crate::ingest::load_catalog(&config.catalog_path, config.sheet.as_deref())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

    let audit_db = match crate::audit::open_audit_db(&config.audit_db) {
        Ok(_) => Some(config.audit_db.clone()),
        Err(e) => {
            warn!("log de auditoría deshabilitado: no se pudo abrir {}: {}", config.audit_db.display(), e);
            None
        }
    };

    let state = web::Data::new(AppState::new(catalog, PolicyConfig::from_env(), config.backend, audit_db));
    info!("escuchando en http://{} (backend: {})", config.bind, config.backend);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
