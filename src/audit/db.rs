use rusqlite::Connection;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Abre (o crea) la base de auditoría en `path`, creando el directorio si
/// hace falta, y asegura el esquema.
pub fn open_audit_db<P: AsRef<Path>>(path: P) -> Result<Connection, Box<dyn Error>> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Initialize the audit schema on an open connection.
pub fn init_db(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            duration_ms REAL NOT NULL,
            status TEXT NOT NULL,
            selected_count INTEGER NOT NULL,
            objective REAL
        )",
        [],
    )?;
    Ok(())
}
