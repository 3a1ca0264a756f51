//! Remote call contract: operation names, the response envelope, and the
//! single rule that turns an envelope into success or failure.
//!
//! Every function answers with `{ statusCode, body: { result, data, error } }`.
//! Only `statusCode == 200` counts as success. On failure the human-readable
//! message lives in `body.error`, either as a plain string or as a structured
//! `{ message, code }` object depending on the operation.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::infra::secrets::redact_json;

use super::{
    channel::{RemoteChannel, TransportError},
    requests::RemoteRequest,
};

pub const SUCCESS_STATUS: i64 = 200;
pub const GENERIC_FAILURE_MESSAGE: &str = "operation failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    SignIn,
    RegisterStart,
    RegisterConfirm,
    ResetStart,
    ResetConfirm,
    PostMessage,
    DeleteAccount,
    DeletePost,
}

impl Operation {
    /// Name of the backend function this operation invokes.
    pub fn function_name(self) -> &'static str {
        match self {
            Self::ListPosts => "GetPosts",
            Self::SignIn => "SignInCognitoUser",
            Self::RegisterStart => "StartAddingPendingCognitoUser",
            Self::RegisterConfirm => "FinishAddingPendingCognitoUser",
            Self::ResetStart => "StartChangingForgottenCognitoUserPassword",
            Self::ResetConfirm => "FinishChangingForgottenCognitoUserPassword",
            Self::PostMessage => "AddPost",
            Self::DeleteAccount => "DeleteCognitoUser",
            Self::DeletePost => "DeletePost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ListPosts => "list-posts",
            Self::SignIn => "sign-in",
            Self::RegisterStart => "register-start",
            Self::RegisterConfirm => "register-confirm",
            Self::ResetStart => "reset-start",
            Self::ResetConfirm => "reset-confirm",
            Self::PostMessage => "post-message",
            Self::DeleteAccount => "delete-account",
            Self::DeletePost => "delete-post",
        }
    }

    /// Identity operations report structured errors; post and account
    /// operations report plain strings.
    pub fn error_shape(self) -> ErrorShape {
        match self {
            Self::SignIn
            | Self::RegisterStart
            | Self::RegisterConfirm
            | Self::ResetStart
            | Self::ResetConfirm => ErrorShape::Structured,
            Self::ListPosts | Self::PostMessage | Self::DeleteAccount | Self::DeletePost => {
                ErrorShape::Plain
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    Plain,
    Structured,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// The two shapes `body.error` takes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Plain(String),
    Structured(StructuredError),
}

impl ErrorPayload {
    pub fn shape(&self) -> ErrorShape {
        match self {
            Self::Plain(_) => ErrorShape::Plain,
            Self::Structured(_) => ErrorShape::Structured,
        }
    }

    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::Plain(message) => Some(message.as_str()),
            Self::Structured(error) => error.message.as_deref(),
        };

        message.map(str::trim).filter(|message| !message.is_empty())
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Structured(error) => error.code.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "statusCode")]
    status_code: i64,
    #[serde(default)]
    body: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct EnvelopeBody {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Status and error message extracted from one response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub status_code: i64,
    /// `None` exactly when the status is 200.
    pub error_message: Option<String>,
    pub result: Option<String>,
    pub data: Option<Value>,
}

impl NormalizedResponse {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("{message}")]
    Remote { status: i64, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed {operation} response: {details}")]
    MalformedResponse {
        operation: &'static str,
        details: String,
    },
    #[error("could not encode {operation} request: {details}")]
    EncodeRequest {
        operation: &'static str,
        details: String,
    },
}

/// Splits a raw envelope into status, error message, and payload data.
pub fn normalize(operation: Operation, raw: Value) -> Result<NormalizedResponse, CallError> {
    let envelope: Envelope =
        serde_json::from_value(raw).map_err(|error| CallError::MalformedResponse {
            operation: operation.label(),
            details: error.to_string(),
        })?;

    let body = decode_body(envelope.body);

    let error_message = if envelope.status_code == SUCCESS_STATUS {
        None
    } else {
        Some(extract_error_message(operation, body.error))
    };

    Ok(NormalizedResponse {
        status_code: envelope.status_code,
        error_message,
        result: body.result,
        data: body.data,
    })
}

/// Performs exactly one remote call for `request` and interprets its response.
pub fn call<R: RemoteRequest>(
    channel: &mut dyn RemoteChannel,
    request: &R,
) -> Result<R::Output, CallError> {
    let operation = R::OPERATION;
    let function = operation.function_name();

    let payload = serde_json::to_value(request).map_err(|error| CallError::EncodeRequest {
        operation: operation.label(),
        details: error.to_string(),
    })?;

    tracing::debug!(
        function,
        payload = %redact_json(&payload),
        "invoking remote function"
    );

    let raw = channel.invoke(function, payload).inspect_err(|error| {
        tracing::warn!(function, error = %error, "remote call failed in transport");
    })?;

    tracing::debug!(function, response = %redact_json(&raw), "remote function answered");

    let response = normalize(operation, raw)?;

    if let Some(message) = response.error_message {
        tracing::info!(
            function,
            status = response.status_code,
            "remote function reported failure"
        );
        return Err(CallError::Remote {
            status: response.status_code,
            message,
        });
    }

    R::extract(response.data).map_err(|details| CallError::MalformedResponse {
        operation: operation.label(),
        details,
    })
}

fn decode_body(body: Option<Value>) -> EnvelopeBody {
    let value = match body {
        // Proxy-style gateways wrap the body as a JSON string.
        Some(Value::String(text)) => serde_json::from_str(&text).ok(),
        other => other,
    };

    value
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

fn extract_error_message(operation: Operation, error: Option<Value>) -> String {
    let Some(payload) = error.and_then(|value| serde_json::from_value::<ErrorPayload>(value).ok())
    else {
        return GENERIC_FAILURE_MESSAGE.to_owned();
    };

    if payload.shape() != operation.error_shape() {
        tracing::warn!(
            operation = operation.label(),
            expected = ?operation.error_shape(),
            actual = ?payload.shape(),
            "backend error payload has unexpected shape"
        );
    }

    if let Some(code) = payload.code() {
        tracing::debug!(operation = operation.label(), code, "backend error code");
    }

    payload
        .message()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        remote::requests::{DeletePostRequest, GetPostsRequest, SignInRequest},
        test_support::ScriptedChannel,
    };

    #[test]
    fn status_200_has_no_error_message() {
        let response = normalize(
            Operation::PostMessage,
            json!({ "statusCode": 200, "body": { "result": "success" } }),
        )
        .expect("envelope should decode");

        assert!(response.is_success());
        assert_eq!(response.result.as_deref(), Some("success"));
    }

    #[test]
    fn plain_error_is_read_for_post_operations() {
        let response = normalize(
            Operation::PostMessage,
            json!({ "statusCode": 500, "body": { "result": "failure", "error": "table missing" } }),
        )
        .expect("envelope should decode");

        assert_eq!(response.error_message.as_deref(), Some("table missing"));
    }

    #[test]
    fn structured_error_message_is_read_for_identity_operations() {
        let response = normalize(
            Operation::SignIn,
            json!({
                "statusCode": 400,
                "body": {
                    "result": "failure",
                    "error": { "message": "Incorrect username or password.", "code": "NotAuthorizedException" }
                }
            }),
        )
        .expect("envelope should decode");

        assert_eq!(
            response.error_message.as_deref(),
            Some("Incorrect username or password.")
        );
    }

    #[test]
    fn any_non_200_status_is_failure_even_2xx() {
        let response = normalize(
            Operation::DeleteAccount,
            json!({ "statusCode": 204, "body": {} }),
        )
        .expect("envelope should decode");

        assert_eq!(
            response.error_message.as_deref(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
    }

    #[test]
    fn missing_or_unreadable_error_falls_back_to_generic_message() {
        for body in [
            json!({}),
            json!({ "error": 42 }),
            json!({ "error": { "code": "Boom" } }),
            json!({ "error": "   " }),
        ] {
            let response = normalize(
                Operation::RegisterStart,
                json!({ "statusCode": 500, "body": body }),
            )
            .expect("envelope should decode");

            assert_eq!(
                response.error_message.as_deref(),
                Some(GENERIC_FAILURE_MESSAGE)
            );
        }
    }

    #[test]
    fn mismatched_error_shape_still_yields_its_message() {
        let response = normalize(
            Operation::DeletePost,
            json!({ "statusCode": 403, "body": { "error": { "message": "not your post" } } }),
        )
        .expect("envelope should decode");

        assert_eq!(response.error_message.as_deref(), Some("not your post"));
    }

    #[test]
    fn string_encoded_body_is_unwrapped() {
        let response = normalize(
            Operation::PostMessage,
            json!({ "statusCode": 500, "body": "{\"error\":\"throttled\"}" }),
        )
        .expect("envelope should decode");

        assert_eq!(response.error_message.as_deref(), Some("throttled"));
    }

    #[test]
    fn envelope_without_status_is_malformed() {
        let error = normalize(Operation::ListPosts, json!({ "errorMessage": "Task timed out" }))
            .expect_err("must be malformed");

        assert!(matches!(
            error,
            CallError::MalformedResponse {
                operation: "list-posts",
                ..
            }
        ));
    }

    #[test]
    fn call_sends_wire_fields_to_named_function() {
        let mut channel = ScriptedChannel::new(vec![Ok(json!({
            "statusCode": 200,
            "body": { "result": "success" }
        }))]);

        call(
            &mut channel,
            &DeletePostRequest::new("tok-1", "1609459200"),
        )
        .expect("call should succeed");

        let calls = channel.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function, "DeletePost");
        assert_eq!(
            calls[0].payload,
            json!({ "AccessToken": "tok-1", "TimestampOfPost": "1609459200" })
        );
    }

    #[test]
    fn call_maps_non_200_to_remote_error() {
        let mut channel = ScriptedChannel::new(vec![Ok(json!({
            "statusCode": 401,
            "body": { "error": { "message": "Incorrect username or password" } }
        }))]);

        let error = call(&mut channel, &SignInRequest::new("alice", "wrong"))
            .expect_err("call must fail");

        assert_eq!(
            error,
            CallError::Remote {
                status: 401,
                message: "Incorrect username or password".to_owned()
            }
        );
    }

    #[test]
    fn call_propagates_transport_errors_without_retry() {
        let mut channel = ScriptedChannel::new(vec![Err(TransportError::Timeout {
            function: "GetPosts".to_owned(),
        })]);

        let error = call(&mut channel, &GetPostsRequest::new(10)).expect_err("call must fail");

        assert!(matches!(error, CallError::Transport(TransportError::Timeout { .. })));
        assert_eq!(channel.calls().len(), 1);
    }

    #[test]
    fn call_rejects_success_without_required_data() {
        let mut channel = ScriptedChannel::new(vec![Ok(json!({
            "statusCode": 200,
            "body": { "result": "success" }
        }))]);

        let error = call(&mut channel, &SignInRequest::new("alice", "pw"))
            .expect_err("call must fail");

        assert!(matches!(
            error,
            CallError::MalformedResponse {
                operation: "sign-in",
                ..
            }
        ));
    }
}
