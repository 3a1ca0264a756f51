use serde_json::Value;
use thiserror::Error;

/// Failures below the contract: the call never produced a readable envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request to {function} timed out")]
    Timeout { function: String },
    #[error("could not reach {function}: {message}")]
    Unreachable { function: String, message: String },
    #[error("{function} gateway answered HTTP {status}")]
    HttpStatus { function: String, status: u16 },
    #[error("{function} returned an unreadable payload: {message}")]
    InvalidPayload { function: String, message: String },
}

/// Synchronous function-invocation channel to the backend.
///
/// Takes a function name and a JSON request, returns the function's JSON
/// response envelope. One call at a time; no retries.
pub trait RemoteChannel {
    fn invoke(&mut self, function: &str, payload: Value) -> Result<Value, TransportError>;
}

impl<T: RemoteChannel + ?Sized> RemoteChannel for &mut T {
    fn invoke(&mut self, function: &str, payload: Value) -> Result<Value, TransportError> {
        (**self).invoke(function, payload)
    }
}

impl<T: RemoteChannel + ?Sized> RemoteChannel for Box<T> {
    fn invoke(&mut self, function: &str, payload: Value) -> Result<Value, TransportError> {
        (**self).invoke(function, payload)
    }
}
