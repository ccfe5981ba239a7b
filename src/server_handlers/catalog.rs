use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::server::AppState;

/// GET /catalog
/// Devuelve el catálogo agrupado por período para dibujar los toggles.
pub async fn catalog_handler(state: web::Data<AppState>) -> HttpResponse {
    let periods: Vec<serde_json::Value> = state
        .catalog
        .by_period()
        .into_iter()
        .map(|(period, courses)| json!({"period": period, "courses": courses}))
        .collect();
    HttpResponse::Ok().json(json!({"count": state.catalog.len(), "periods": periods}))
}
