use crate::ingest::io::normalize_header;
use crate::ingest::CatalogError;
use crate::models::{coerce_bool, coerce_number, Catalog, Course};
use tracing::{debug, warn};

/// Columnas reconocidas (normalizadas) para cada campo del curso. Incluye
/// los nombres de la planilla original y alias en inglés/español.
const ID_COLUMNS: &[&str] = &["x", "id", "codigo", "code"];
const TITLE_COLUMNS: &[&str] = &["titulo", "title", "nome", "nombre", "disciplina"];
const PERIOD_COLUMNS: &[&str] = &["periodo", "period", "semestre", "term"];
const CREDIT_COLUMNS: &[&str] = &["creditos", "credits", "credito", "ch"];
const PREREQ_COLUMNS: &[&str] = &["prerequisito", "prerequisitos", "prerequisites", "prereq", "requisitos"];
const DONE_COLUMNS: &[&str] = &["completou", "completed", "concluida", "aprovado"];
const WEIGHT_COLUMNS: &[&str] = &["peso", "weight", "preferencia", "objetivo", "score"];
const SCHEDULE_COLUMNS: &[&str] = &["horario", "schedule", "horarios", "slot", "slots"];

#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    title: usize,
    period: Option<usize>,
    credits: Option<usize>,
    prereq: Option<usize>,
    done: Option<usize>,
    weight: Option<usize>,
    schedule: Option<usize>,
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| aliases.contains(&h.as_str()))
}

fn map_columns(header_row: &[String]) -> Result<ColumnMap, CatalogError> {
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let title = find_column(&headers, TITLE_COLUMNS).ok_or(CatalogError::MissingColumn("title"))?;
    let map = ColumnMap {
        id: find_column(&headers, ID_COLUMNS),
        title,
        period: find_column(&headers, PERIOD_COLUMNS),
        credits: find_column(&headers, CREDIT_COLUMNS),
        prereq: find_column(&headers, PREREQ_COLUMNS),
        done: find_column(&headers, DONE_COLUMNS),
        weight: find_column(&headers, WEIGHT_COLUMNS),
        schedule: find_column(&headers, SCHEDULE_COLUMNS),
    };
    for (name, col) in [
        ("period", map.period),
        ("credits", map.credits),
        ("prerequisites", map.prereq),
        ("completed", map.done),
        ("weight", map.weight),
        ("schedule", map.schedule),
    ] {
        if col.is_none() {
            warn!("el catálogo no tiene columna '{}'; se usan valores por defecto", name);
        }
    }
    Ok(map)
}

/// Construye el catálogo a partir de filas ya leídas (la primera fila es el
/// encabezado). Filas sin título se omiten; celdas sucias degradan a 0/false.
pub fn catalog_from_rows(rows: &[Vec<String>]) -> Result<Catalog, CatalogError> {
    let (header, body) = rows.split_first().ok_or(CatalogError::Empty)?;
    let cols = map_columns(header)?;

    let cell = |row: &Vec<String>, col: Option<usize>| -> String {
        col.and_then(|c| row.get(c)).map(|s| s.trim().to_string()).unwrap_or_default()
    };

    let mut courses = Vec::new();
    for (row_idx, row) in body.iter().enumerate() {
        let title = cell(row, Some(cols.title));
        if title.is_empty() {
            debug!("omitiendo fila {}: título vacío", row_idx + 2);
            continue;
        }
        let id = match cell(row, cols.id) {
            id if id.is_empty() => (row_idx + 1).to_string(),
            id => id,
        };
        courses.push(Course {
            id,
            title,
            period: coerce_number(&cell(row, cols.period)).trunc() as i32,
            credits: coerce_number(&cell(row, cols.credits)),
            prerequisites: cell(row, cols.prereq),
            weight: coerce_number(&cell(row, cols.weight)),
            schedule: cell(row, cols.schedule),
            completed: coerce_bool(&cell(row, cols.done)),
        });
    }
    Ok(Catalog::new(courses))
}
