//! Remote layer: the call contract with the backend functions and the
//! channels that carry those calls.

pub mod channel;
pub mod contract;
pub mod http;
pub mod requests;

pub use channel::RemoteChannel;
pub use http::HttpChannel;

/// Returns the remote module name for smoke checks.
pub fn module_name() -> &'static str {
    "remote"
}
