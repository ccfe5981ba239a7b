use actix_web::{web, HttpResponse};
use serde_json::json;
use std::collections::HashMap;
use crate::server::AppState;

/// GET /runs?limit=20
/// Últimas ejecuciones registradas en el log de auditoría.
pub async fn runs_handler(state: web::Data<AppState>, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let limit = query
        .get("limit")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(20)
        .min(500);

    let db_path = match state.audit_db.clone() {
        Some(p) => p,
        None => return HttpResponse::ServiceUnavailable().json(json!({"error": "audit log is disabled"})),
    };

    let result = web::block(move || -> Result<Vec<crate::audit::RunRow>, String> {
        let conn = crate::audit::open_audit_db(&db_path).map_err(|e| e.to_string())?;
        crate::audit::recent_runs(&conn, limit).map_err(|e| e.to_string())
    })
    .await;

    match result {
        Ok(Ok(rows)) => HttpResponse::Ok().json(json!({"runs": rows})),
        Ok(Err(e)) => HttpResponse::InternalServerError().json(json!({"error": format!("failed to read runs: {}", e)})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    }
}
