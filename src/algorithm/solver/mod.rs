//! Programa entero binario de selección de cursos.
//!
//! El modelo se describe contra el trait [`IntegerProgram`], de modo que el
//! motor de resolución es intercambiable:
//! - [`GoodLpBackend`]: `good_lp` con el solver MIP `microlp`
//! - [`BranchAndBound`]: búsqueda exacta en el crate, sin dependencias
//!
//! Formulación: una variable binaria por candidato, maximizar
//! Σ peso·x sujeto a `min <= Σx <= max` y, por cada grupo de conflicto,
//! Σx <= 1.

mod branch_bound;
mod good_lp_backend;

pub use branch_bound::BranchAndBound;
pub use good_lp_backend::GoodLpBackend;

use crate::algorithm::conflict::ConflictIndex;
use crate::config::PolicyConfig;
use crate::error::PlanError;
use crate::models::Course;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Umbral para considerar seleccionada una variable binaria.
pub const SELECTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEq,
    GreaterEq,
    Equal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub terms: Vec<(VarId, f64)>,
    pub cmp: Comparison,
    pub rhs: f64,
}

/// Estado terminal de una resolución.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Fault(String),
}

/// Capacidad mínima que el modelo necesita de un motor de programación entera.
pub trait IntegerProgram {
    fn add_binary_variable(&mut self, name: &str) -> VarId;
    fn add_constraint(&mut self, constraint: LinearConstraint);
    /// Fija el objetivo lineal a maximizar.
    fn set_objective(&mut self, terms: Vec<(VarId, f64)>);
    fn solve(&mut self) -> SolveStatus;
    /// Valor de la variable en la última solución óptima.
    fn value(&self, var: VarId) -> Option<f64>;
}

/// Modelo lineal en memoria. Ambos backends lo acumulan y lo traducen al
/// resolver.
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    pub names: Vec<String>,
    pub constraints: Vec<LinearConstraint>,
    pub objective: Vec<(VarId, f64)>,
}

impl LinearModel {
    pub fn add_variable(&mut self, name: &str) -> VarId {
        self.names.push(name.to_string());
        VarId(self.names.len() - 1)
    }

    pub fn var_count(&self) -> usize {
        self.names.len()
    }
}

/// Motor a usar en cada petición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    GoodLp,
    BranchAndBound,
}

impl BackendKind {
    pub fn create(&self) -> Box<dyn IntegerProgram> {
        match self {
            BackendKind::GoodLp => Box::new(GoodLpBackend::new()),
            BackendKind::BranchAndBound => Box::new(BranchAndBound::new()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::GoodLp => write!(f, "good_lp"),
            BackendKind::BranchAndBound => write!(f, "branch_and_bound"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good_lp" | "goodlp" | "microlp" => Ok(BackendKind::GoodLp),
            "branch_and_bound" | "bnb" => Ok(BackendKind::BranchAndBound),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

/// Resultado del solver: índices (sobre la lista de candidatos) y valor
/// objetivo.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub objective: f64,
}

/// Construye y resuelve el programa de selección sobre `candidates`.
pub fn solve_selection(
    candidates: &[&Course],
    conflicts: &ConflictIndex,
    policy: &PolicyConfig,
    backend: &mut dyn IntegerProgram,
) -> Result<Selection, PlanError> {
    if candidates.is_empty() {
        return Err(PlanError::EmptyCandidateSet);
    }
    let infeasible = || PlanError::Infeasible {
        min: policy.min_courses,
        max: policy.max_courses,
        candidates: candidates.len(),
    };

    let vars: Vec<VarId> = candidates
        .iter()
        .map(|c| backend.add_binary_variable(&format!("x_{}", c.id)))
        .collect();

    backend.set_objective(vars.iter().zip(candidates).map(|(v, c)| (*v, c.weight)).collect());

    let all: Vec<(VarId, f64)> = vars.iter().map(|v| (*v, 1.0)).collect();
    backend.add_constraint(LinearConstraint {
        terms: all.clone(),
        cmp: Comparison::GreaterEq,
        rhs: policy.min_courses as f64,
    });
    backend.add_constraint(LinearConstraint { terms: all, cmp: Comparison::LessEq, rhs: policy.max_courses as f64 });

    for (slot, members) in conflicts.groups_by_slot.iter() {
        debug!("grupo de conflicto {} -> {:?}", slot, members);
        backend.add_constraint(LinearConstraint {
            terms: members.iter().map(|&i| (vars[i], 1.0)).collect(),
            cmp: Comparison::LessEq,
            rhs: 1.0,
        });
    }

    info!(
        "resolviendo modelo: {} variables, {} grupos de conflicto, cotas [{}, {}]",
        vars.len(),
        conflicts.group_count(),
        policy.min_courses,
        policy.max_courses
    );

    match backend.solve() {
        SolveStatus::Optimal => {}
        SolveStatus::Infeasible => return Err(infeasible()),
        SolveStatus::Unbounded => return Err(PlanError::SolverFault("model reported unbounded".to_string())),
        SolveStatus::Fault(msg) => return Err(PlanError::SolverFault(msg)),
    }

    let mut indices = Vec::new();
    for (i, var) in vars.iter().enumerate() {
        match backend.value(*var) {
            Some(v) if v > SELECTION_THRESHOLD => indices.push(i),
            Some(_) => {}
            None => return Err(PlanError::SolverFault(format!("no value reported for {}", var.0))),
        }
    }

    // Una solución "óptima" que viola el modelo es un fallo del motor, no un
    // resultado parcial.
    if indices.len() < policy.min_courses || indices.len() > policy.max_courses {
        return Err(PlanError::SolverFault(format!(
            "solver returned {} courses outside [{}, {}]",
            indices.len(),
            policy.min_courses,
            policy.max_courses
        )));
    }
    for members in conflicts.groups_by_slot.values() {
        if members.iter().filter(|m| indices.contains(*m)).count() > 1 {
            return Err(PlanError::SolverFault("solver returned two conflicting courses".to_string()));
        }
    }

    let objective = indices.iter().map(|&i| candidates[i].weight).sum();
    Ok(Selection { indices, objective })
}
