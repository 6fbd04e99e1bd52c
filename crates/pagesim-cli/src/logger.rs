use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Installs the stderr logger once.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` selects the level
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn setup_logger(verbosity: u8) {
    INIT.call_once(|| {
        let default_level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
    });
}
