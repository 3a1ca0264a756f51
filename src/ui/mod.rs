//! UI layer: line-oriented menu shell and plain-text rendering.

pub mod menu;
pub mod message_rendering;
pub mod shell;
pub mod terminal;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
