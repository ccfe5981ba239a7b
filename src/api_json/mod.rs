use crate::config::PolicyConfig;
use crate::models::CompletionMap;
use serde::{Deserialize, Serialize};

/// Parámetros de entrada para una optimización.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "completed": { "1": true, "2": false },
///   "completed_ids": ["3"],
///   "policy": { "max_courses": 6 }
/// }
/// ```
///
/// # Campos:
/// - `completed`: mapa id estable -> concluido (sobrescribe el catálogo)
/// - `completed_ids`: forma corta; cada id listado cuenta como concluido
/// - `policy`: política opcional para esta petición (campos ausentes = default)
///
/// El motor de resolución no se elige por petición: lo fija el servidor
/// (`GRADESHIFT_BACKEND`). Un campo `backend` en el cuerpo se ignora.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub completed: CompletionMap,
    #[serde(default)]
    pub completed_ids: Vec<String>,
    #[serde(default)]
    pub policy: Option<PolicyConfig>,
}

impl OptimizeRequest {
    /// Une `completed` y `completed_ids` en un solo mapa. Una entrada
    /// explícita en `completed` gana sobre la forma corta.
    pub fn completion_map(&self) -> CompletionMap {
        let mut map: CompletionMap = self.completed_ids.iter().map(|id| (id.trim().to_string(), true)).collect();
        for (id, done) in &self.completed {
            map.insert(id.trim().to_string(), *done);
        }
        map
    }
}

pub fn parse_optimize_request(json_str: &str) -> Result<OptimizeRequest, serde_json::Error> {
    if json_str.trim().is_empty() {
        return Ok(OptimizeRequest::default());
    }
    serde_json::from_str::<OptimizeRequest>(json_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let json_data = r#"
        {
            "completed": {"1": true, "2": false},
            "completed_ids": ["2", "3"],
            "policy": {"max_courses": 6}
        }
        "#;
        let req = parse_optimize_request(json_data).expect("Debe parsear el request");
        let map = req.completion_map();
        assert_eq!(map.get("1"), Some(&true));
        assert_eq!(map.get("2"), Some(&false));
        assert_eq!(map.get("3"), Some(&true));
        let policy = req.policy.expect("Debe haber policy");
        assert_eq!(policy.max_courses, 6);
        assert_eq!(policy.min_courses, 2);
    }

    #[test]
    fn test_empty_body_is_default() {
        let req = parse_optimize_request("  ").unwrap();
        assert!(req.completion_map().is_empty());
        assert!(req.policy.is_none());
    }

    #[test]
    fn test_backend_in_body_is_ignored() {
        let req = parse_optimize_request(r#"{"backend": "branch_and_bound", "completed_ids": ["1"]}"#).unwrap();
        assert_eq!(req.completion_map().get("1"), Some(&true));
        let echoed = serde_json::to_value(&req).unwrap();
        assert!(echoed.get("backend").is_none());
    }
}
