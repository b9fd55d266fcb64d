//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Default directive when `RUST_LOG` is not set
const DEV_FILTER: &str = "basis_core=debug,basis_engine=debug";
const PROD_FILTER: &str = "basis_core=info,basis_engine=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; pair with `init_test_capture()` for assertions
    Test,
}

static INIT_ONCE: Once = Once::new();

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the logging facility
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter. If another global subscriber is already installed this
/// is a no-op.
///
/// # Example
///
/// ```
/// use basis_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// init(Profile::Production); // ignored
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter(DEV_FILTER))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(PROD_FILTER))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // A subscriber set elsewhere (e.g. test capture) wins
        installed.ok();
    });
}
