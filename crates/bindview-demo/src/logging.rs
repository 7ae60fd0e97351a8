//! Log subscriber setup.
//!
//! `RUST_LOG` wins over `--log-level` when set. Output goes to stderr so the
//! rendered view on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Build the filter from `RUST_LOG`, falling back to `level`.
pub fn filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|err| DemoError::InvalidLogFilter {
        filter: level.to_string(),
        message: err.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: &str, json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| DemoError::LoggingInit {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_names_and_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(filter("warn").is_ok());
        assert!(filter("bindview_core=trace,info").is_ok());
    }

    #[test]
    fn rejects_garbage_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = filter("bindview_core=verbose").unwrap_err();
        assert!(matches!(err, DemoError::InvalidLogFilter { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
