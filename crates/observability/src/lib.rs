//! Process-wide tracing setup for hosts embedding the economy.

pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize tracing from the environment.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    tracing::init();
}
