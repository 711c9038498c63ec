//! Diagnostics on stderr, so generated code on stdout stays clean.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Filter used for a given number of `-v` flags.
pub(crate) fn filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "typedwire=info,warn",
        2 => "typedwire=debug,info",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `-v` flags win over `RUST_LOG`; without them `RUST_LOG` applies, then `warn`.
pub(crate) fn init(verbosity: u8) {
    let filter = if verbosity > 0 {
        EnvFilter::new(filter_for(verbosity))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(0)))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A subscriber may already be set in tests.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_get_louder() {
        assert_eq!(filter_for(0), "warn");
        assert_eq!(filter_for(1), "typedwire=info,warn");
        assert_eq!(filter_for(2), "typedwire=debug,info");
        assert_eq!(filter_for(7), "trace");
    }

    #[test]
    fn test_filters_parse() {
        for verbosity in 0..4 {
            assert!(EnvFilter::try_new(filter_for(verbosity)).is_ok());
        }
    }
}
