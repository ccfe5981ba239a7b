use super::{Comparison, IntegerProgram, LinearModel, LinearConstraint, SolveStatus, VarId};
use good_lp::{constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};
use tracing::{info, warn};

/// Backend sobre `good_lp` con el solver MIP puro-Rust `microlp`.
#[derive(Debug, Default)]
pub struct GoodLpBackend {
    model: LinearModel,
    values: Option<Vec<f64>>,
}

impl GoodLpBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_expression(terms: &[(VarId, f64)], vars: &[Variable]) -> Expression {
    terms.iter().map(|(v, coef)| *coef * vars[v.0]).sum()
}

impl IntegerProgram for GoodLpBackend {
    fn add_binary_variable(&mut self, name: &str) -> VarId {
        self.values = None;
        self.model.add_variable(name)
    }

    fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.values = None;
        self.model.constraints.push(constraint);
    }

    fn set_objective(&mut self, terms: Vec<(VarId, f64)>) {
        self.values = None;
        self.model.objective = terms;
    }

    fn solve(&mut self) -> SolveStatus {
        let start = std::time::Instant::now();
        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = self
            .model
            .names
            .iter()
            .map(|name| problem.add(variable().binary().name(name.clone())))
            .collect();

        let objective = to_expression(&self.model.objective, &vars);
        let mut model = problem.maximise(objective).using(microlp);
        for c in &self.model.constraints {
            let lhs = to_expression(&c.terms, &vars);
            let rhs = c.rhs;
            model = match c.cmp {
                Comparison::LessEq => model.with(constraint!(lhs <= rhs)),
                Comparison::GreaterEq => model.with(constraint!(lhs >= rhs)),
                Comparison::Equal => model.with(constraint!(lhs == rhs)),
            };
        }

        match model.solve() {
            Ok(solution) => {
                self.values = Some(vars.iter().map(|v| solution.value(*v)).collect());
                info!("good_lp: solución en {:.2?}", start.elapsed());
                SolveStatus::Optimal
            }
            Err(ResolutionError::Infeasible) => SolveStatus::Infeasible,
            Err(ResolutionError::Unbounded) => SolveStatus::Unbounded,
            Err(e) => {
                warn!("good_lp falló: {}", e);
                SolveStatus::Fault(e.to_string())
            }
        }
    }

    fn value(&self, var: VarId) -> Option<f64> {
        self.values.as_ref().and_then(|vals| vals.get(var.0).copied())
    }
}
