use crate::models::{Course, SelectedCourse};

/// Proyecta la selección a registros de presentación ordenados por período.
/// El orden es estable respecto al catálogo en caso de empate.
pub fn project(candidates: &[&Course], selected: &[usize]) -> Vec<SelectedCourse> {
    let mut indices: Vec<usize> = selected.iter().copied().filter(|&i| i < candidates.len()).collect();
    indices.sort_unstable();
    indices.dedup();

    let mut out: Vec<SelectedCourse> = indices
        .into_iter()
        .map(|i| {
            let c = candidates[i];
            SelectedCourse { title: c.title.clone(), period: c.period, weight: c.weight, schedule: c.schedule.clone() }
        })
        .collect();
    out.sort_by_key(|c| c.period);
    out
}
