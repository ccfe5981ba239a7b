//! Configuración: constantes de política del motor y parámetros del servidor.
//!
//! Los valores por defecto reproducen el comportamiento histórico (2..=10
//! cursos, TCC con 140 créditos, estágio con 120). Ambas estructuras pueden
//! cargarse desde el entorno (`.env` incluido, vía `dotenv`).

use crate::algorithm::solver::BackendKind;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_MIN_COURSES: usize = 2;
pub const DEFAULT_MAX_COURSES: usize = 10;
pub const CAPSTONE_TITLE: &str = "Trabalho de Conclusão de Curso";
pub const CAPSTONE_MIN_CREDITS: f64 = 140.0;
pub const PRACTICUM_TITLE: &str = "Estágio Supervisionado";
pub const PRACTICUM_MIN_CREDITS: f64 = 120.0;

/// Regla que libera un curso concreto al alcanzar un umbral de créditos,
/// ignorando sus prerrequisitos listados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOverride {
    pub title: String,
    pub min_credits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_courses: usize,
    pub max_courses: usize,
    pub overrides: Vec<EligibilityOverride>,
    pub prerequisite_delimiter: String,
    pub slot_delimiter: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            min_courses: DEFAULT_MIN_COURSES,
            max_courses: DEFAULT_MAX_COURSES,
            overrides: vec![
                EligibilityOverride { title: CAPSTONE_TITLE.to_string(), min_credits: CAPSTONE_MIN_CREDITS },
                EligibilityOverride { title: PRACTICUM_TITLE.to_string(), min_credits: PRACTICUM_MIN_CREDITS },
            ],
            prerequisite_delimiter: ",".to_string(),
            slot_delimiter: ",".to_string(),
        }
    }
}

impl PolicyConfig {
    /// Carga la política desde el entorno. Valores inválidos se ignoran con
    /// un warning y se mantiene el default.
    pub fn from_env() -> Self {
        load_dotenv();
        let mut policy = PolicyConfig::default();
        if let Some(v) = env_parse::<usize>("GRADESHIFT_MIN_COURSES") {
            policy.min_courses = v;
        }
        if let Some(v) = env_parse::<usize>("GRADESHIFT_MAX_COURSES") {
            policy.max_courses = v;
        }
        if let Some(v) = env_parse::<f64>("GRADESHIFT_CAPSTONE_CREDITS") {
            policy.set_threshold(CAPSTONE_TITLE, v);
        }
        if let Some(v) = env_parse::<f64>("GRADESHIFT_PRACTICUM_CREDITS") {
            policy.set_threshold(PRACTICUM_TITLE, v);
        }
        if let Ok(d) = env::var("GRADESHIFT_PREREQ_DELIMITER") {
            policy.prerequisite_delimiter = d;
        }
        if let Ok(d) = env::var("GRADESHIFT_SLOT_DELIMITER") {
            policy.slot_delimiter = d;
        }
        if let Err(e) = policy.validate() {
            warn!("{}; se usa la política por defecto", e);
            return PolicyConfig::default();
        }
        policy
    }

    fn set_threshold(&mut self, title: &str, min_credits: f64) {
        match self.overrides.iter_mut().find(|o| o.title == title) {
            Some(rule) => rule.min_credits = min_credits,
            None => self.overrides.push(EligibilityOverride { title: title.to_string(), min_credits }),
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.min_courses > self.max_courses {
            return Err(PlanError::InvalidPolicy(format!(
                "min_courses ({}) is greater than max_courses ({})",
                self.min_courses, self.max_courses
            )));
        }
        if self.prerequisite_delimiter.is_empty() || self.slot_delimiter.is_empty() {
            return Err(PlanError::InvalidPolicy("delimiters must not be empty".to_string()));
        }
        if let Some(rule) = self.overrides.iter().find(|o| !o.min_credits.is_finite()) {
            return Err(PlanError::InvalidPolicy(format!("override '{}' has a non-finite threshold", rule.title)));
        }
        Ok(())
    }
}

/// Parámetros del proceso servidor.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub catalog_path: PathBuf,
    pub sheet: Option<String>,
    pub audit_db: PathBuf,
    pub backend: BackendKind,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8080".to_string(),
            catalog_path: PathBuf::from("data/catalog.xlsx"),
            sheet: None,
            audit_db: PathBuf::from("audit/runs.db"),
            backend: BackendKind::GoodLp,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        let mut cfg = ServerConfig::default();
        if let Ok(v) = env::var("GRADESHIFT_BIND") {
            cfg.bind = v;
        }
        if let Ok(v) = env::var("GRADESHIFT_CATALOG") {
            cfg.catalog_path = PathBuf::from(v);
        }
        cfg.sheet = env::var("GRADESHIFT_SHEET").ok().filter(|s| !s.trim().is_empty());
        if let Ok(v) = env::var("GRADESHIFT_AUDIT_DB") {
            cfg.audit_db = PathBuf::from(v);
        }
        if let Some(kind) = env_parse::<BackendKind>("GRADESHIFT_BACKEND") {
            cfg.backend = kind;
        }
        if let Ok(v) = env::var("GRADESHIFT_LOG") {
            cfg.log_level = v;
        }
        cfg
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignorando {}={:?}: valor inválido", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_historic_constants() {
        let p = PolicyConfig::default();
        assert_eq!(p.min_courses, 2);
        assert_eq!(p.max_courses, 10);
        assert_eq!(p.overrides.len(), 2);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let p = PolicyConfig { min_courses: 5, max_courses: 3, ..PolicyConfig::default() };
        assert!(matches!(p.validate(), Err(PlanError::InvalidPolicy(_))));
    }

    #[test]
    fn partial_json_policy_keeps_defaults() {
        let p: PolicyConfig = serde_json::from_str(r#"{"max_courses": 6}"#).unwrap();
        assert_eq!(p.max_courses, 6);
        assert_eq!(p.min_courses, 2);
        assert_eq!(p.slot_delimiter, ",");
    }

    #[test]
    fn set_threshold_updates_existing_rule() {
        let mut p = PolicyConfig::default();
        p.set_threshold(CAPSTONE_TITLE, 150.0);
        let rule = p.overrides.iter().find(|o| o.title == CAPSTONE_TITLE).unwrap();
        assert_eq!(rule.min_credits, 150.0);
        assert_eq!(p.overrides.len(), 2);
    }
}
