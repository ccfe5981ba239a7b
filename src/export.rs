//! Exportación de la grade a texto delimitado (UTF-8, con encabezado).

use crate::models::SelectedCourse;
use std::fs;
use std::path::Path;

pub const DEFAULT_FILE_NAME: &str = "grade_otimizada.csv";
const HEADER: [&str; 4] = ["title", "period", "weight", "schedule"];

fn quote(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serializa la grade. Campos que contienen el delimitador, comillas o
/// saltos de línea se encierran entre comillas dobles.
pub fn to_delimited(courses: &[SelectedCourse], delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut out = HEADER.join(sep.as_str());
    out.push('\n');
    for c in courses {
        let fields = [
            quote(&c.title, delimiter),
            c.period.to_string(),
            c.weight.to_string(),
            quote(&c.schedule, delimiter),
        ];
        out.push_str(&fields.join(sep.as_str()));
        out.push('\n');
    }
    out
}

/// Escribe la grade separada por comas en `path` (UTF-8).
pub fn write_csv<P: AsRef<Path>>(path: P, courses: &[SelectedCourse]) -> std::io::Result<()> {
    fs::write(path, to_delimited(courses, ',').as_bytes())
}
