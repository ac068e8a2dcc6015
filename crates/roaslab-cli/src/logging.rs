use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV_VAR: &str = "ROASLAB_LOG";

const DEFAULT_FILTER: &str = "error";

/// Installs a stderr subscriber so stdout stays reserved for command output.
/// `ROASLAB_LOG` takes `EnvFilter` directives, e.g. `roaslab_client=debug`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .try_init();
}
