// Biblioteca raíz del crate `gradeshift`.
// Motor de decisión (filtro, conflictos, programa entero, proyección) más
// las piezas periféricas: carga del catálogo, exportación CSV, log de
// auditoría y servidor HTTP.
pub mod algorithm;
pub mod api_json;
pub mod audit;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod server;
mod server_handlers;
pub mod telemetry;

pub use algorithm::{optimize, optimize_with, BackendKind, Plan, RunOutcome, RunReport};
pub use config::PolicyConfig;
pub use error::PlanError;
pub use models::{Catalog, CompletionMap, Course, SelectedCourse};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
