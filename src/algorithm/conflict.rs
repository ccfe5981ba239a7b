// Funciones para parsear códigos de horario y detectar conflictos entre candidatos.
use crate::models::Course;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Franja semanal fija: (día, hora). Dos cursos chocan si comparten una.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeSlot {
    pub day: String,
    pub hour: u32,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day, self.hour)
    }
}

/// Parsear un token ("seg8", "Ter 10", "10qua") a una franja. Se toma el
/// primer tramo contiguo de dígitos como hora y el primer tramo contiguo de
/// letras (en minúsculas) como día. Si falta alguno -> None.
pub fn parse_slot_token(token: &str) -> Option<TimeSlot> {
    let token = token.trim();
    let digits: String = token
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let letters: String = token
        .chars()
        .skip_while(|c| !c.is_alphabetic())
        .take_while(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect();
    if digits.is_empty() || letters.is_empty() {
        return None;
    }
    // una hora que no cabe en u32 se trata como token malformado
    let hour = digits.parse::<u32>().ok()?;
    Some(TimeSlot { day: letters, hour })
}

/// Parsear un código de horario completo a su conjunto de franjas.
/// Los tokens malformados se descartan en silencio.
pub fn parse_slots(code: &str, delimiter: &str) -> BTreeSet<TimeSlot> {
    let mut slots = BTreeSet::new();
    for token in code.split(delimiter).map(str::trim).filter(|t| !t.is_empty()) {
        match parse_slot_token(token) {
            Some(slot) => {
                slots.insert(slot);
            }
            None => debug!("descartando token de horario inválido {:?} en {:?}", token, code),
        }
    }
    slots
}

/// Índice de conflictos sobre la lista de candidatos (índices = posiciones
/// en esa lista).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictIndex {
    /// Franjas de cada candidato.
    pub slots_by_course: Vec<BTreeSet<TimeSlot>>,
    /// Sólo franjas compartidas por 2+ candidatos (grupos de exclusión).
    pub groups_by_slot: BTreeMap<TimeSlot, Vec<usize>>,
}

impl ConflictIndex {
    pub fn group_count(&self) -> usize {
        self.groups_by_slot.len()
    }

    /// True si los candidatos `a` y `b` comparten al menos una franja.
    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        match (self.slots_by_course.get(a), self.slots_by_course.get(b)) {
            (Some(sa), Some(sb)) => a != b && !sa.is_disjoint(sb),
            _ => false,
        }
    }
}

/// Construye el índice: parsea cada candidato e invierte a franja -> cursos.
pub fn index_conflicts(candidates: &[&Course], delimiter: &str) -> ConflictIndex {
    let slots_by_course: Vec<BTreeSet<TimeSlot>> = candidates
        .iter()
        .map(|c| parse_slots(&c.schedule, delimiter))
        .collect();

    let mut by_slot: BTreeMap<TimeSlot, Vec<usize>> = BTreeMap::new();
    for (idx, slots) in slots_by_course.iter().enumerate() {
        for slot in slots {
            by_slot.entry(slot.clone()).or_default().push(idx);
        }
    }
    by_slot.retain(|_, members| members.len() >= 2);

    ConflictIndex { slots_by_course, groups_by_slot: by_slot }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot_token() {
        assert_eq!(parse_slot_token("mon9"), Some(TimeSlot { day: "mon".into(), hour: 9 }));
        assert_eq!(parse_slot_token(" TUE10 "), Some(TimeSlot { day: "tue".into(), hour: 10 }));
        assert_eq!(parse_slot_token("10qua"), Some(TimeSlot { day: "qua".into(), hour: 10 }));
        assert_eq!(parse_slot_token("Sáb 8"), Some(TimeSlot { day: "sáb".into(), hour: 8 }));
        assert_eq!(parse_slot_token("mon"), None);
        assert_eq!(parse_slot_token("9"), None);
        assert_eq!(parse_slot_token("??"), None);
        assert_eq!(parse_slot_token("mon99999999999999"), None);
    }

    #[test]
    fn test_parse_slots_collapses_duplicates() {
        let slots = parse_slots("mon9, MON9, tue10, garbage", ",");
        assert_eq!(slots.len(), 2);
    }
}
