use super::{Comparison, IntegerProgram, LinearConstraint, LinearModel, SolveStatus, VarId};
use tracing::{debug, info};

const EPS: f64 = 1e-9;

/// Búsqueda exacta en profundidad para programas 0/1 con restricciones
/// lineales arbitrarias.
///
/// Poda por factibilidad (cota de actividad mínima/máxima de cada restricción
/// con las variables libres) y por cota del objetivo: valor actual + los
/// `k - elegidas` mayores coeficientes positivos aún libres, donde `k` es el
/// tope de cardinalidad del modelo si lo tiene. Determinista: el orden de
/// ramificación depende sólo del modelo.
#[derive(Debug, Default)]
pub struct BranchAndBound {
    model: LinearModel,
    values: Option<Vec<f64>>,
    nodes: u64,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodos explorados en la última resolución.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes
    }
}

struct Search<'a> {
    model: &'a LinearModel,
    order: Vec<usize>,
    obj: Vec<f64>,
    // pos_prefix[k] = Σ max(0, obj) de order[..k]
    pos_prefix: Vec<f64>,
    cap: Option<usize>,
    picked: usize,
    // por variable: (restricción, coeficiente)
    occurs: Vec<Vec<(usize, f64)>>,
    fixed: Vec<f64>,
    free_min: Vec<f64>,
    free_max: Vec<f64>,
    assignment: Vec<f64>,
    best: Option<(f64, Vec<f64>)>,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(model: &'a LinearModel) -> Self {
        let n = model.var_count();
        let mut obj = vec![0.0; n];
        for (v, a) in &model.objective {
            obj[v.0] += a;
        }

        let mut occurs: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut free_min = vec![0.0; model.constraints.len()];
        let mut free_max = vec![0.0; model.constraints.len()];
        for (ci, c) in model.constraints.iter().enumerate() {
            for (v, a) in &c.terms {
                occurs[v.0].push((ci, *a));
                if *a > 0.0 {
                    free_max[ci] += a;
                } else {
                    free_min[ci] += a;
                }
            }
        }

        // primero las variables de mayor coeficiente: encuentra buenas
        // soluciones pronto y la cota poda más
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|a, b| obj[*b].total_cmp(&obj[*a]).then(a.cmp(b)));

        let mut pos_prefix = vec![0.0; n + 1];
        for k in 0..n {
            pos_prefix[k + 1] = pos_prefix[k] + obj[order[k]].max(0.0);
        }
        let cap = cardinality_cap(model);

        Search {
            model,
            order,
            obj,
            pos_prefix,
            cap,
            picked: 0,
            occurs,
            fixed: vec![0.0; model.constraints.len()],
            free_min,
            free_max,
            assignment: vec![0.0; n],
            best: None,
            nodes: 0,
        }
    }

    fn constraint_possible(&self, ci: usize, c: &LinearConstraint) -> bool {
        let lo = self.fixed[ci] + self.free_min[ci];
        let hi = self.fixed[ci] + self.free_max[ci];
        match c.cmp {
            Comparison::LessEq => lo <= c.rhs + EPS,
            Comparison::GreaterEq => hi >= c.rhs - EPS,
            Comparison::Equal => lo <= c.rhs + EPS && hi >= c.rhs - EPS,
        }
    }

    fn assign(&mut self, var: usize, value: f64) -> bool {
        self.assignment[var] = value;
        let mut ok = true;
        for &(ci, a) in &self.occurs[var] {
            if a > 0.0 {
                self.free_max[ci] -= a;
            } else {
                self.free_min[ci] -= a;
            }
            self.fixed[ci] += a * value;
        }
        for &(ci, _) in &self.occurs[var] {
            if !self.constraint_possible(ci, &self.model.constraints[ci]) {
                ok = false;
                break;
            }
        }
        ok
    }

    fn unassign(&mut self, var: usize, value: f64) {
        for &(ci, a) in &self.occurs[var] {
            if a > 0.0 {
                self.free_max[ci] += a;
            } else {
                self.free_min[ci] += a;
            }
            self.fixed[ci] -= a * value;
        }
        self.assignment[var] = 0.0;
    }

    /// Cota superior de lo que aún pueden aportar las variables libres.
    /// Como `order` va de mayor a menor coeficiente, los mejores `r` libres
    /// son justamente los siguientes `r`.
    fn bound(&self, depth: usize) -> f64 {
        let n = self.order.len();
        let remaining = match self.cap {
            Some(k) => k.saturating_sub(self.picked),
            None => n,
        };
        let end = depth.saturating_add(remaining).min(n);
        self.pos_prefix[end] - self.pos_prefix[depth]
    }

    fn dfs(&mut self, depth: usize, current: f64) {
        self.nodes += 1;
        if let Some((best, _)) = &self.best {
            if current + self.bound(depth) <= *best + EPS {
                return;
            }
        }
        if depth == self.order.len() {
            self.best = Some((current, self.assignment.clone()));
            return;
        }

        let var = self.order[depth];
        let branches = if self.obj[var] > 0.0 { [1.0, 0.0] } else { [0.0, 1.0] };
        for value in branches {
            let take = value > 0.5;
            if self.assign(var, value) {
                if take {
                    self.picked += 1;
                }
                self.dfs(depth + 1, current + self.obj[var] * value);
                if take {
                    self.picked -= 1;
                }
            }
            self.unassign(var, value);
        }
    }
}

/// Tope `Σx <= k` (o `= k`) con coeficiente 1 sobre todas las variables.
/// Si hay varios, el menor.
fn cardinality_cap(model: &LinearModel) -> Option<usize> {
    let n = model.var_count();
    model
        .constraints
        .iter()
        .filter(|c| c.cmp != Comparison::GreaterEq && c.terms.len() == n && c.rhs >= 0.0)
        .filter(|c| c.terms.iter().all(|(_, a)| (*a - 1.0).abs() < EPS))
        .filter(|c| {
            let mut seen = vec![false; n];
            c.terms.iter().all(|(v, _)| v.0 < n && !std::mem::replace(&mut seen[v.0], true))
        })
        .map(|c| (c.rhs + EPS).floor() as usize)
        .min()
}

impl IntegerProgram for BranchAndBound {
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
        if let Some(bad) = self
            .model
            .constraints
            .iter()
            .flat_map(|c| c.terms.iter())
            .chain(self.model.objective.iter())
            .find(|(v, a)| v.0 >= self.model.var_count() || !a.is_finite())
        {
            return SolveStatus::Fault(format!("invalid term {:?}", bad));
        }

        let start = std::time::Instant::now();
        let mut search = Search::new(&self.model);

        // restricciones que ya son imposibles sin fijar nada
        let root_ok = self
            .model
            .constraints
            .iter()
            .enumerate()
            .all(|(ci, c)| search.constraint_possible(ci, c));
        if root_ok {
            search.dfs(0, 0.0);
        }
        self.nodes = search.nodes;
        debug!("branch and bound: {} nodos explorados", self.nodes);

        match search.best {
            Some((objective, values)) => {
                info!("branch and bound: óptimo {} en {:.2?}", objective, start.elapsed());
                self.values = Some(values);
                SolveStatus::Optimal
            }
            None => SolveStatus::Infeasible,
        }
    }

    fn value(&self, var: VarId) -> Option<f64> {
        self.values.as_ref().and_then(|vals| vals.get(var.0).copied())
    }
}
