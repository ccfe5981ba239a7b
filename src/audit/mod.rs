pub mod db;
pub mod insertions;

pub use db::{init_db, open_audit_db};
pub use insertions::{record_run, recent_runs, RunRow};
