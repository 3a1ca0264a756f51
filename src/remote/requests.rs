//! Typed request bodies for each backend function and the decoders for the
//! payloads they return on success.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::domain::message::Message;

use super::contract::Operation;

/// A request that knows which operation it belongs to and how to read the
/// `body.data` of a successful response.
pub trait RemoteRequest: Serialize {
    const OPERATION: Operation;
    type Output;

    fn extract(data: Option<Value>) -> Result<Self::Output, String>;
}

fn required_data<T: DeserializeOwned>(data: Option<Value>) -> Result<T, String> {
    let value = data.ok_or_else(|| "body.data is missing".to_owned())?;
    serde_json::from_value(value).map_err(|error| error.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPostsRequest {
    pub sort_by: String,
    pub sort_order: String,
    pub posts_to_get: u64,
}

impl GetPostsRequest {
    pub fn new(count: u64) -> Self {
        Self {
            sort_by: "timestamp".to_owned(),
            sort_order: "ascending".to_owned(),
            posts_to_get: count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AttributeString {
    #[serde(rename = "S")]
    s: String,
}

#[derive(Debug, Deserialize)]
struct WirePost {
    #[serde(rename = "Alias")]
    alias: AttributeString,
    #[serde(rename = "Message")]
    message: AttributeString,
    #[serde(rename = "Timestamp")]
    timestamp: AttributeString,
}

impl From<WirePost> for Message {
    fn from(post: WirePost) -> Self {
        Message::new(post.alias.s, post.message.s, post.timestamp.s)
    }
}

impl RemoteRequest for GetPostsRequest {
    const OPERATION: Operation = Operation::ListPosts;
    type Output = Vec<Message>;

    fn extract(data: Option<Value>) -> Result<Self::Output, String> {
        let posts: Vec<WirePost> = required_data(data)?;
        Ok(posts.into_iter().map(Message::from).collect())
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignInRequest {
    pub user_name: String,
    pub password: String,
}

impl SignInRequest {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignInData {
    authentication_result: AuthenticationResult,
}

impl RemoteRequest for SignInRequest {
    const OPERATION: Operation = Operation::SignIn;
    /// The access token.
    type Output = String;

    fn extract(data: Option<Value>) -> Result<Self::Output, String> {
        let data: SignInData = required_data(data)?;
        let token = data.authentication_result.access_token;
        if token.trim().is_empty() {
            return Err("AccessToken is empty".to_owned());
        }
        Ok(token)
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterUserRequest {
    pub user_name: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyUserRequest {
    pub user_name: String,
    pub confirmation_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartResetPasswordRequest {
    pub user_name: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinishResetPasswordRequest {
    pub user_name: String,
    pub confirmation_code: String,
    pub new_password: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddPostRequest {
    pub access_token: String,
    pub message: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteAccountRequest {
    pub access_token: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeletePostRequest {
    pub access_token: String,
    pub timestamp_of_post: String,
}

impl DeletePostRequest {
    pub fn new(access_token: impl Into<String>, timestamp_of_post: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            timestamp_of_post: timestamp_of_post.into(),
        }
    }
}

macro_rules! unit_request {
    ($request:ty => $operation:ident) => {
        impl RemoteRequest for $request {
            const OPERATION: Operation = Operation::$operation;
            type Output = ();

            fn extract(_data: Option<Value>) -> Result<Self::Output, String> {
                Ok(())
            }
        }
    };
}

unit_request!(RegisterUserRequest => RegisterStart);
unit_request!(VerifyUserRequest => RegisterConfirm);
unit_request!(StartResetPasswordRequest => ResetStart);
unit_request!(FinishResetPasswordRequest => ResetConfirm);
unit_request!(AddPostRequest => PostMessage);
unit_request!(DeleteAccountRequest => DeleteAccount);
unit_request!(DeletePostRequest => DeletePost);
