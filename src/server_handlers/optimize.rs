use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::algorithm::{optimize_with, RunOutcome};
use crate::api_json::parse_optimize_request;
use crate::error::PlanError;
use crate::server::AppState;
use tracing::warn;

fn error_response(err: &PlanError) -> HttpResponse {
    let body = json!({"status": "error", "kind": err.kind(), "error": err.to_string()});
    match err {
        PlanError::EmptyCandidateSet | PlanError::Infeasible { .. } => HttpResponse::UnprocessableEntity().json(body),
        PlanError::InvalidPolicy(_) => HttpResponse::BadRequest().json(body),
        PlanError::SolverFault(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Parsea, resuelve en un hilo bloqueante (con semáforo) y registra la
/// ejecución en el log de auditoría.
async fn run_request(state: &web::Data<AppState>, body: &str) -> Result<RunOutcome, HttpResponse> {
    let req = parse_optimize_request(body)
        .map_err(|e| HttpResponse::BadRequest().json(json!({"status": "error", "error": format!("failed to parse input: {}", e)})))?;

    let completion = req.completion_map();
    let policy = req.policy.unwrap_or_else(|| state.policy.clone());
    let backend = state.backend;
    let catalog = state.catalog.clone();

    let permit = state
        .solver_slots
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| HttpResponse::InternalServerError().json(json!({"status": "error", "error": "failed to acquire semaphore"})))?;

    let outcome = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        optimize_with(&catalog, &completion, &policy, backend)
    })
    .await
    .map_err(|e| HttpResponse::InternalServerError().json(json!({"status": "error", "error": format!("task join error: {}", e)})))?;

    if let Some(db_path) = state.audit_db.clone() {
        let report = outcome.report.clone();
        tokio::task::spawn_blocking(move || {
            let res = crate::audit::open_audit_db(&db_path)
                .and_then(|conn| crate::audit::record_run(&conn, &report).map_err(|e| e.into()));
            if let Err(e) = res {
                warn!("no se pudo registrar la ejecución: {}", e);
            }
        });
    }

    Ok(outcome)
}

/// POST /optimize
pub async fn optimize_handler(state: web::Data<AppState>, body: String) -> HttpResponse {
    let outcome = match run_request(&state, &body).await {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    match &outcome.result {
        Ok(plan) => HttpResponse::Ok().json(json!({
            "status": outcome.report.status,
            "elapsed_ms": outcome.report.elapsed.as_secs_f64() * 1000.0,
            "objective": plan.objective,
            "candidate_count": plan.candidate_count,
            "courses": plan.courses,
        })),
        Err(e) => error_response(e),
    }
}

/// POST /optimize/csv: misma entrada, devuelve la grade como CSV.
pub async fn optimize_csv_handler(state: web::Data<AppState>, body: String) -> HttpResponse {
    let outcome = match run_request(&state, &body).await {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    match &outcome.result {
        Ok(plan) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", crate::export::DEFAULT_FILE_NAME),
            ))
            .body(crate::export::to_delimited(&plan.courses, ',')),
        Err(e) => error_response(e),
    }
}
