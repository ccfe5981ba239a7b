use actix_web::HttpResponse;
use serde_json::json;
use crate::api_json::OptimizeRequest;
use crate::config::PolicyConfig;
use crate::models::CompletionMap;

pub async fn help_handler() -> HttpResponse {
    let mut completed = CompletionMap::new();
    completed.insert("1".to_string(), true);
    completed.insert("2".to_string(), false);
    let example = OptimizeRequest {
        completed,
        completed_ids: vec!["3".to_string()],
        policy: Some(PolicyConfig::default()),
    };

    let help = json!({
        "description": "API para generar la grade optimizada. POST /optimize recibe qué disciplinas ya fueron concluidas (por id estable) y devuelve la selección de mayor peso sin choques de horario.",
        "post_example": example,
        "endpoints": {
            "GET /catalog": "catálogo agrupado por período",
            "POST /optimize": "grade optimizada (JSON)",
            "POST /optimize/csv": "grade optimizada (CSV, UTF-8)",
            "GET /runs?limit=20": "últimas ejecuciones (duración y estado)"
        },
        "errors": ["empty_candidate_set", "infeasible", "solver_fault", "invalid_policy"]
    });

    HttpResponse::Ok().json(help)
}
