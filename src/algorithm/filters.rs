//! Filtro de elegibilidad del catálogo (fase 1 del pipeline).
//!
//! Dado el catálogo y el estado de conclusión, devuelve los cursos
//! pendientes que el estudiante puede cursar ahora mismo.
//!
//! Precedencia para cada curso no concluido:
//! 1. prerrequisito vacío (o equivalente a nulo) -> elegible
//! 2. override por créditos acumulados (TCC, estágio) -> elegible
//! 3. todos los títulos listados deben estar concluidos (semántica conjuntiva)

use crate::config::PolicyConfig;
use crate::models::{Catalog, Course};
use std::collections::HashSet;
use tracing::debug;

/// Foto de lo ya concluido: títulos y suma de créditos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionState {
    completed_titles: HashSet<String>,
    completed_credits: f64,
}

impl CompletionState {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut state = CompletionState::default();
        for course in catalog.courses().iter().filter(|c| c.completed) {
            state.completed_titles.insert(course.title.trim().to_string());
            state.completed_credits += course.credits;
        }
        state
    }

    pub fn is_completed(&self, title: &str) -> bool {
        self.completed_titles.contains(title.trim())
    }

    pub fn completed_credits(&self) -> f64 {
        self.completed_credits
    }

    pub fn completed_count(&self) -> usize {
        self.completed_titles.len()
    }
}

/// Valores que las planillas usan para "sin prerrequisito".
fn is_null_equivalent(expr: &str) -> bool {
    let t = expr.trim().to_lowercase();
    matches!(t.as_str(), "" | "-" | "--" | "nan" | "none" | "null" | "nenhum")
}

/// Separa la expresión de prerrequisitos en títulos requeridos
/// (recortados, sin tokens vacíos).
pub fn parse_prerequisites(expr: &str, delimiter: &str) -> Vec<String> {
    if is_null_equivalent(expr) {
        return Vec::new();
    }
    expr.split(delimiter)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Evalúa la elegibilidad de un curso pendiente.
pub fn is_eligible(course: &Course, state: &CompletionState, policy: &PolicyConfig) -> bool {
    if is_null_equivalent(&course.prerequisites) {
        return true;
    }

    let title = course.title.trim();
    if let Some(rule) = policy.overrides.iter().find(|o| o.title.trim() == title) {
        if state.completed_credits() >= rule.min_credits {
            debug!("'{}' habilitado por créditos ({} >= {})", title, state.completed_credits(), rule.min_credits);
            return true;
        }
    }

    // NOTE: el delimitador se documentó como "alternativas", pero se exige
    // que TODOS los títulos estén concluidos.
    parse_prerequisites(&course.prerequisites, &policy.prerequisite_delimiter)
        .iter()
        .all(|req| state.is_completed(req))
}

/// Devuelve los candidatos en el orden del catálogo. Un curso concluido
/// nunca es candidato.
pub fn filter_candidates<'a>(catalog: &'a Catalog, state: &CompletionState, policy: &PolicyConfig) -> Vec<&'a Course> {
    catalog
        .courses()
        .iter()
        .filter(|c| !c.completed)
        .filter(|c| is_eligible(c, state, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, prereq: &str, credits: f64, completed: bool) -> Course {
        Course {
            id: title.to_string(),
            title: title.to_string(),
            period: 1,
            credits,
            prerequisites: prereq.to_string(),
            weight: 1.0,
            schedule: String::new(),
            completed,
        }
    }

    #[test]
    fn test_parse_prerequisites() {
        assert_eq!(parse_prerequisites(" A , B,, ", ","), vec!["A", "B"]);
        assert!(parse_prerequisites("nan", ",").is_empty());
        assert!(parse_prerequisites("   ", ",").is_empty());
        assert!(parse_prerequisites(",,", ",").is_empty());
    }

    #[test]
    fn test_completion_state_sums_credits() {
        let catalog = Catalog::new(vec![
            course("A", "", 4.0, true),
            course("B", "", 6.0, true),
            course("C", "", 8.0, false),
        ]);
        let state = CompletionState::from_catalog(&catalog);
        assert_eq!(state.completed_credits(), 10.0);
        assert!(state.is_completed("A"));
        assert!(state.is_completed(" B "));
        assert!(!state.is_completed("C"));
    }

    #[test]
    fn test_conjunctive_prerequisites() {
        let policy = PolicyConfig::default();
        let target = course("D", "A, B", 4.0, false);

        let only_a = Catalog::new(vec![course("A", "", 4.0, true), course("B", "", 4.0, false)]);
        assert!(!is_eligible(&target, &CompletionState::from_catalog(&only_a), &policy));

        let both = Catalog::new(vec![course("A", "", 4.0, true), course("B", "", 4.0, true)]);
        assert!(is_eligible(&target, &CompletionState::from_catalog(&both), &policy));
    }

    #[test]
    fn test_override_thresholds() {
        let policy = PolicyConfig::default();
        let capstone = course(crate::config::CAPSTONE_TITLE, "Algo que nunca se cursa", 8.0, false);
        let practicum = course(crate::config::PRACTICUM_TITLE, "Otro requisito", 8.0, false);

        let below = Catalog::new(vec![course("X", "", 119.0, true)]);
        let state = CompletionState::from_catalog(&below);
        assert!(!is_eligible(&capstone, &state, &policy));
        assert!(!is_eligible(&practicum, &state, &policy));

        let mid = Catalog::new(vec![course("X", "", 120.0, true)]);
        let state = CompletionState::from_catalog(&mid);
        assert!(!is_eligible(&capstone, &state, &policy));
        assert!(is_eligible(&practicum, &state, &policy));

        let high = Catalog::new(vec![course("X", "", 140.0, true)]);
        let state = CompletionState::from_catalog(&high);
        assert!(is_eligible(&capstone, &state, &policy));
    }
}
