//! Domain layer: posts, session state, and action outcomes.

pub mod message;
pub mod outcome;
pub mod session;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
