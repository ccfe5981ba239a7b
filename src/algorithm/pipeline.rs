// pipeline.rs - Orquestador de una petición de optimización
//
// PHASE 1: filtro de elegibilidad (prerrequisitos + overrides por créditos)
// PHASE 2: índice de conflictos por franja horaria
// PHASE 3: programa entero binario (cardinalidad + conflictos)
// PHASE 4: proyección ordenada por período
//
// Todo es local a la petición: el catálogo se recibe por referencia y el
// estado de conclusión se construye de cero en cada llamada.

use crate::algorithm::conflict::index_conflicts;
use crate::algorithm::filters::{filter_candidates, CompletionState};
use crate::algorithm::projector::project;
use crate::algorithm::solver::{solve_selection, IntegerProgram};
use crate::config::PolicyConfig;
use crate::error::PlanError;
use crate::models::{Catalog, CompletionMap, SelectedCourse};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Grade generada.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub courses: Vec<SelectedCourse>,
    pub objective: f64,
    pub candidate_count: usize,
    pub conflict_groups: usize,
}

/// Canal lateral para el sink de auditoría: duración y estado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    #[serde(rename = "elapsed_ms")]
    #[serde(serialize_with = "serialize_ms")]
    pub elapsed: Duration,
    pub status: String,
    pub selected_count: usize,
    pub objective: Option<f64>,
}

fn serialize_ms<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

/// Resultado de una invocación: la grade (o el error) más el reporte.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: Result<Plan, PlanError>,
    pub report: RunReport,
}

/// Ejecuta el pipeline completo para un vector de conclusión.
pub fn optimize(
    catalog: &Catalog,
    completion: &CompletionMap,
    policy: &PolicyConfig,
    backend: &mut dyn IntegerProgram,
) -> RunOutcome {
    let start = Instant::now();
    let result = run_phases(catalog, completion, policy, backend);
    let elapsed = start.elapsed();

    let report = match &result {
        Ok(plan) => RunReport {
            elapsed,
            status: "OK".to_string(),
            selected_count: plan.courses.len(),
            objective: Some(plan.objective),
        },
        Err(e) => RunReport { elapsed, status: format!("ERRO: {}", e), selected_count: 0, objective: None },
    };
    match &result {
        Ok(plan) => info!("grade generada en {:.2?}: {} cursos, objetivo {}", elapsed, plan.courses.len(), plan.objective),
        Err(e) => warn!("optimización fallida tras {:.2?}: {}", elapsed, e),
    }
    RunOutcome { result, report }
}

fn run_phases(
    catalog: &Catalog,
    completion: &CompletionMap,
    policy: &PolicyConfig,
    backend: &mut dyn IntegerProgram,
) -> Result<Plan, PlanError> {
    policy.validate()?;

    info!("PHASE 1: filtro de elegibilidad sobre {} cursos", catalog.len());
    let snapshot = catalog.with_completion(completion);
    let state = CompletionState::from_catalog(&snapshot);
    let candidates = filter_candidates(&snapshot, &state, policy);
    info!(
        "   concluidos: {} ({} créditos), candidatos: {}",
        state.completed_count(),
        state.completed_credits(),
        candidates.len()
    );
    if candidates.is_empty() {
        return Err(PlanError::EmptyCandidateSet);
    }

    info!("PHASE 2: índice de conflictos");
    let conflicts = index_conflicts(&candidates, &policy.slot_delimiter);
    info!("   grupos de conflicto: {}", conflicts.group_count());

    info!("PHASE 3: modelo de selección");
    let selection = solve_selection(&candidates, &conflicts, policy, backend)?;

    info!("PHASE 4: proyección");
    let courses = project(&candidates, &selection.indices);

    Ok(Plan {
        courses,
        objective: selection.objective,
        candidate_count: candidates.len(),
        conflict_groups: conflicts.group_count(),
    })
}
