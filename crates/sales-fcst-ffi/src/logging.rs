//! Process-wide logging setup for hosts embedding the library.
//!
//! The subscriber is configured from the environment:
//! - `SALES_FCST_LOG`: filter directives, e.g. `sales_fcst_core=debug`
//! - `SALES_FCST_DISABLE_LOGGING`: if set, no subscriber is installed
//!
//! Hosts that already install their own `tracing` subscriber simply never
//! call [`init_logging`].

use std::env;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_FILTER_ENV: &str = "SALES_FCST_LOG";

/// Environment variable that disables logging setup.
pub const DISABLE_LOGGING_ENV: &str = "SALES_FCST_DISABLE_LOGGING";

/// Filter used when `SALES_FCST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "sales_fcst_core=info,sales_fcst_ffi=info";

/// Whether our subscriber was installed (set once per process)
static LOGGING_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Check whether logging setup has been disabled through the environment.
pub fn is_disabled_by_env() -> bool {
    env::var(DISABLE_LOGGING_ENV).is_ok()
}

/// Build the filter from `SALES_FCST_LOG`, falling back to [`DEFAULT_FILTER`].
fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr `fmt` subscriber. Safe to call repeatedly.
///
/// Returns true if this library's subscriber is the active global one.
pub fn init_logging() -> bool {
    *LOGGING_INSTALLED.get_or_init(|| {
        if is_disabled_by_env() {
            return false;
        }

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(filter_from_env())
            .try_init()
            .is_ok()
    })
}
