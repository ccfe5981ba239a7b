//! Carga del catálogo de cursos desde disco.
//!
//! Submódulos:
//! - `io`: helpers de calamine (celdas -> String, encabezados normalizados)
//! - `sheet`: mapeo de columnas de la planilla a `Course`

mod io;
mod sheet;

pub use io::{normalize_header, read_sheet_rows};
pub use sheet::catalog_from_rows;

use crate::models::Catalog;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is empty (no header row)")]
    Empty,
    #[error("catalog has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("failed to read catalog file: {0}")]
    Read(String),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Carga un catálogo. `.json` se lee con serde; cualquier otra extensión se
/// abre como planilla (xlsx/xls/ods) con calamine.
pub fn load_catalog<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let catalog = if is_json {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Read(format!("{}: {}", path.display(), e)))?;
        let mut catalog = serde_json::from_str::<Catalog>(&text)?;
        catalog.fill_missing_ids();
        catalog
    } else {
        let rows = read_sheet_rows(path, sheet).map_err(|e| CatalogError::Read(format!("{}: {}", path.display(), e)))?;
        catalog_from_rows(&rows)?
    };

    info!("catálogo cargado desde {}: {} cursos", path.display(), catalog.len());
    Ok(catalog)
}
