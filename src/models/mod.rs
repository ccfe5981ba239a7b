// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Identificador estable de un curso (columna `x` de la planilla original).
pub type CourseId = String;

/// Mapa id -> concluido que entrega la capa de presentación en cada petición.
pub type CompletionMap = HashMap<CourseId, bool>;

/// Un curso del catálogo. Los campos numéricos y el flag de conclusión se
/// aceptan en formato "sucio" (strings, null, números) y degradan a 0/false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: CourseId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_period")]
    pub period: i32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub credits: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prerequisites: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub schedule: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: bool,
}

/// Catálogo ordenado de cursos. El orden se preserva en el filtrado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Catalog { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Cursos sin id reciben su posición (base 1), igual que las filas de
    /// planilla sin la columna `x`.
    pub fn fill_missing_ids(&mut self) {
        for (idx, course) in self.courses.iter_mut().enumerate() {
            if course.id.trim().is_empty() {
                course.id = (idx + 1).to_string();
            }
        }
    }

    /// Devuelve una copia del catálogo con los flags de conclusión
    /// sobrescritos por `completion`. Ids ausentes del mapa conservan el
    /// valor del catálogo; ids desconocidos se ignoran.
    pub fn with_completion(&self, completion: &CompletionMap) -> Catalog {
        let courses = self
            .courses
            .iter()
            .map(|c| {
                let mut course = c.clone();
                if let Some(done) = completion.get(&c.id) {
                    course.completed = *done;
                }
                course
            })
            .collect();
        Catalog { courses }
    }

    /// Agrupa los cursos por período (ascendente), conservando el orden del
    /// catálogo dentro de cada período. Lo usa la capa de presentación para
    /// dibujar los toggles.
    pub fn by_period(&self) -> Vec<(i32, Vec<&Course>)> {
        let mut periods: Vec<i32> = self.courses.iter().map(|c| c.period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
            .into_iter()
            .map(|p| (p, self.courses.iter().filter(|c| c.period == p).collect()))
            .collect()
    }
}

/// Registro de salida: sólo los campos de presentación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCourse {
    pub title: String,
    pub period: i32,
    pub weight: f64,
    pub schedule: String,
}

/// Convierte un valor crudo a número. No numérico, vacío o no finito -> 0.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', ".");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Convierte un valor crudo a booleano. Acepta las variantes que aparecen en
/// planillas (true/1/sim/yes/x); cualquier otra cosa es `false`.
pub fn coerce_bool(raw: &str) -> bool {
    let v = raw.trim().to_lowercase();
    match v.as_str() {
        "true" | "verdadeiro" | "sim" | "s" | "yes" | "y" | "x" => true,
        _ => coerce_number(&v) != 0.0,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => coerce_number(&s),
        serde_json::Value::Bool(b) => if b { 1.0 } else { 0.0 },
        _ => 0.0,
    })
}

fn lenient_period<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    let n = lenient_number(d)?;
    Ok(n.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        serde_json::Value::String(s) => coerce_bool(&s),
        _ => false,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    })
}
