//! Logging estructurado con `tracing-subscriber`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global. Prioridad: `RUST_LOG` > `log_level`.
/// Llamadas repetidas no fallan (útil en tests).
pub fn init(log_level: &str) {
    let default_filter = format!("{},gradeshift={}", log_level, log_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}
