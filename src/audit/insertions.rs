use crate::algorithm::RunReport;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;

/// Fila del log de ejecuciones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub id: i64,
    pub ts: String,
    pub duration_ms: f64,
    pub status: String,
    pub selected_count: i64,
    pub objective: Option<f64>,
}

/// Insert a run row (duration + status) into the audit DB.
pub fn record_run(conn: &Connection, report: &RunReport) -> Result<(), rusqlite::Error> {
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO runs (ts, duration_ms, status, selected_count, objective) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ts,
            report.elapsed.as_secs_f64() * 1000.0,
            report.status,
            report.selected_count as i64,
            report.objective,
        ],
    )?;
    Ok(())
}

/// Últimas `limit` ejecuciones, más reciente primero.
pub fn recent_runs(conn: &Connection, limit: usize) -> Result<Vec<RunRow>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, ts, duration_ms, status, selected_count, objective FROM runs ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |r| {
        Ok(RunRow {
            id: r.get(0)?,
            ts: r.get(1)?,
            duration_ms: r.get(2)?,
            status: r.get(3)?,
            selected_count: r.get(4)?,
            objective: r.get(5)?,
        })
    })?;
    let out = rows.collect::<Result<Vec<RunRow>, _>>();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::init_db;
    use std::time::Duration;

    #[test]
    fn record_and_read_back() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        let ok = RunReport {
            elapsed: Duration::from_millis(250),
            status: "OK".to_string(),
            selected_count: 3,
            objective: Some(12.0),
        };
        let failed = RunReport {
            elapsed: Duration::from_millis(5),
            status: "ERRO: no eligible courses".to_string(),
            selected_count: 0,
            objective: None,
        };
        record_run(&conn, &ok).unwrap();
        record_run(&conn, &failed).unwrap();

        let rows = recent_runs(&conn, 10).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].status.starts_with("ERRO"));
        assert_eq!(rows[0].objective, None);
        assert_eq!(rows[1].status, "OK");
        assert_eq!(rows[1].selected_count, 3);
        assert!((rows[1].duration_ms - 250.0).abs() < 1e-6);

        assert_eq!(recent_runs(&conn, 1).unwrap().len(), 1);
    }
}
