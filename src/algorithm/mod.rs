// Motor de decisión: filtro -> conflictos -> solver -> proyección
pub mod conflict;
pub mod filters;
pub mod pipeline;
pub mod projector;
pub mod solver;

pub use conflict::{index_conflicts, ConflictIndex, TimeSlot};
pub use filters::{filter_candidates, CompletionState};
pub use pipeline::{optimize, Plan, RunOutcome, RunReport};
pub use projector::project;
pub use solver::{solve_selection, BackendKind, IntegerProgram, Selection};

use crate::config::PolicyConfig;
use crate::models::{Catalog, CompletionMap};

/// Atajo: ejecuta el pipeline con un backend nuevo del tipo indicado.
pub fn optimize_with(
    catalog: &Catalog,
    completion: &CompletionMap,
    policy: &PolicyConfig,
    kind: BackendKind,
) -> RunOutcome {
    let mut backend = kind.create();
    optimize(catalog, completion, policy, backend.as_mut())
}
