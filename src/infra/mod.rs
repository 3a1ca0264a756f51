//! Infrastructure layer: configuration, logging, and secret handling.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod secrets;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
