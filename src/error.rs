//! Errores del motor de selección.
//!
//! Sólo los fallos a nivel de modelo llegan al llamador; los tokens de horario
//! malformados o celdas sucias se absorben localmente y nunca aparecen aquí.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// El filtro no dejó ningún curso elegible; no se intenta resolver.
    #[error("no eligible courses: every pending course is blocked by prerequisites")]
    EmptyCandidateSet,

    /// No existe una selección que respete la cardinalidad y los conflictos.
    #[error("no conflict-free selection of {min} to {max} courses exists among {candidates} eligible courses")]
    Infeasible { min: usize, max: usize, candidates: usize },

    /// El backend no llegó a una decisión (configuración, recursos, numérico).
    #[error("solver failed to reach a decision: {0}")]
    SolverFault(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

impl PlanError {
    /// Etiqueta estable para clientes HTTP y el log de auditoría.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::EmptyCandidateSet => "empty_candidate_set",
            PlanError::Infeasible { .. } => "infeasible",
            PlanError::SolverFault(_) => "solver_fault",
            PlanError::InvalidPolicy(_) => "invalid_policy",
        }
    }
}
