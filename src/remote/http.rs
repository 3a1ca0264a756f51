use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::infra::{config::RemoteConfig, error::AppError};

use super::channel::{RemoteChannel, TransportError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Function gateway over HTTP: `POST {endpoint}/{function}` with the request
/// as the JSON body, answered by the function's response envelope.
///
/// Owns a current-thread runtime so callers stay synchronous.
pub struct HttpChannel {
    rt: Runtime,
    client: Client,
    endpoint: Url,
}

impl std::fmt::Debug for HttpChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChannel")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl HttpChannel {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let endpoint = parse_endpoint(&config.endpoint)?;

        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::RuntimeInit)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|error| AppError::HttpClientInit(error.to_string()))?;

        Ok(Self {
            rt,
            client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn function_url(&self, function: &str) -> Result<Url, TransportError> {
        self.endpoint
            .join(function)
            .map_err(|error| TransportError::Unreachable {
                function: function.to_owned(),
                message: format!("invalid function url: {error}"),
            })
    }
}

impl RemoteChannel for HttpChannel {
    fn invoke(&mut self, function: &str, payload: Value) -> Result<Value, TransportError> {
        let url = self.function_url(function)?;
        let request = self.client.post(url).json(&payload);

        self.rt.block_on(async {
            let response = request
                .send()
                .await
                .map_err(|error| map_send_error(function, &error))?;

            let status = response.status();
            if !status.is_success() {
                // Some gateways mirror the function's statusCode into the HTTP
                // status; the envelope in the body still carries the message.
                let body = response.text().await.unwrap_or_default();
                return envelope_from_error_body(&body).ok_or(TransportError::HttpStatus {
                    function: function.to_owned(),
                    status: status.as_u16(),
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|error| TransportError::InvalidPayload {
                    function: function.to_owned(),
                    message: error.to_string(),
                })
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, AppError> {
    // A trailing slash makes `join` append the function name instead of
    // replacing the last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|source| AppError::InvalidEndpoint {
        endpoint: raw.to_owned(),
        details: source.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidEndpoint {
            endpoint: raw.to_owned(),
            details: format!("unsupported scheme {}", url.scheme()),
        });
    }

    Ok(url)
}

fn envelope_from_error_body(body: &str) -> Option<Value> {
    serde_json::from_str::<Value>(body)
        .ok()
        .filter(|value| value.get("statusCode").is_some_and(Value::is_i64))
}

fn map_send_error(function: &str, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            function: function.to_owned(),
        }
    } else {
        TransportError::Unreachable {
            function: function.to_owned(),
            message: error.to_string(),
        }
    }
}
