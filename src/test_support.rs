use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::remote::channel::{RemoteChannel, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub function: String,
    pub payload: Value,
}

/// Channel that answers from a fixed script and records every call.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    responses: VecDeque<Result<Value, TransportError>>,
    calls: Vec<RecordedCall>,
}

impl ScriptedChannel {
    pub fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            responses: responses.into(),
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn functions(&self) -> Vec<&str> {
        self.calls.iter().map(|call| call.function.as_str()).collect()
    }
}

impl RemoteChannel for ScriptedChannel {
    fn invoke(&mut self, function: &str, payload: Value) -> Result<Value, TransportError> {
        self.calls.push(RecordedCall {
            function: function.to_owned(),
            payload,
        });

        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {function}"))
    }
}

pub fn success(data: Value) -> Result<Value, TransportError> {
    Ok(json!({ "statusCode": 200, "body": { "result": "success", "data": data } }))
}

pub fn success_without_data() -> Result<Value, TransportError> {
    Ok(json!({ "statusCode": 200, "body": { "result": "success" } }))
}

pub fn plain_failure(status: i64, error: &str) -> Result<Value, TransportError> {
    Ok(json!({ "statusCode": status, "body": { "result": "failure", "error": error } }))
}

pub fn structured_failure(status: i64, message: &str) -> Result<Value, TransportError> {
    Ok(json!({
        "statusCode": status,
        "body": {
            "result": "failure",
            "error": { "message": message, "code": "TestException" }
        }
    }))
}

pub fn signed_in_data(token: &str) -> Value {
    json!({ "AuthenticationResult": { "AccessToken": token } })
}

pub fn wire_post(alias: &str, body: &str, timestamp: &str) -> Value {
    json!({
        "Alias": { "S": alias },
        "Message": { "S": body },
        "Timestamp": { "S": timestamp }
    })
}
