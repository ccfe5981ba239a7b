use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza un encabezado: sin acentos, minúsculas, sólo alfanuméricos.
/// "PRÉ-REQUISITO" -> "prerequisito", "Título " -> "titulo".
pub fn normalize_header(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let c = match ch {
            'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'e',
            'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'i',
            'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'u',
            'Ñ' | 'ñ' => 'n',
            'Ç' | 'ç' => 'c',
            other => other,
        };
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Lee una hoja del workbook como filas de strings. Si `sheet_name` es None
/// o no existe, se usa la primera hoja.
pub fn read_sheet_rows<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error>> {
    let mut workbook = open_workbook_auto(path)?;

    let names = workbook.sheet_names().to_owned();
    let sheet_to_use = match sheet_name {
        Some(wanted) if names.iter().any(|s| s == wanted) => wanted.to_string(),
        _ => match names.first() {
            Some(first) => first.clone(),
            None => return Err("No se encontraron hojas en el archivo".into()),
        },
    };

    let range = workbook.worksheet_range(&sheet_to_use)?;
    Ok(range.rows().map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>()).collect())
}
