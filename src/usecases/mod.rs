//! Use case layer: session workflows and startup orchestration.

pub mod bootstrap;
pub mod context;
pub mod coordinator;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
