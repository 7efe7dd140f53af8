//! Subscriber installation.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// How operation events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug and up
    Development,
    /// One JSON object per event, info and up
    Production,
    /// No output; tests install their own layer via `init_test_capture`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "stratus=debug",
            Profile::Production => "stratus=info",
            Profile::Test => "off",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. Events go to stderr so reports on
/// stdout stay clean.
///
/// ```
/// use stratus_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter());
        match profile {
            Profile::Development => builder.try_init().ok(),
            Profile::Production => builder.json().try_init().ok(),
            Profile::Test => None,
        };
    });
}
