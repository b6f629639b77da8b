//! Global subscriber installation.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

const DEFAULT_DIRECTIVE: &str = "storyline=info";

static INIT: Once = Once::new();

/// Filter read from `STORYLINE_LOG`, e.g.
/// `STORYLINE_LOG=storyline_analytics::graph=debug,storyline_analytics::curator=info`.
///
/// An unset variable gives `storyline=info`. A variable that does not parse
/// gives the same default and a note on stderr.
pub fn log_filter() -> EnvFilter {
    match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(e) => {
            if std::env::var_os(LOG_ENV_VAR).is_some() {
                eprintln!("storyline: ignoring {LOG_ENV_VAR}: {e}");
            }
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }
    }
}

/// Install the fmt subscriber as the global default.
///
/// Only the first call does anything. If some other subscriber already
/// owns the global default, that is reported on stderr and Storyline events
/// go to the existing subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        if let Err(e) = tracing_subscriber::registry()
            .with(log_filter())
            .with(layer)
            .try_init()
        {
            eprintln!("storyline: tracing subscriber not installed: {e}");
        }
    });
}
