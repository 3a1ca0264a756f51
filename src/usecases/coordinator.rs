//! Session workflow coordinator.
//!
//! Maps (session state, requested action, user input) to at most one remote
//! call, applies the result to the session, and hands back an `Outcome`.
//! Preconditions are checked locally first; a rejected action never reaches
//! the channel.

use crate::{
    domain::{
        message::Message,
        outcome::{Failure, Outcome},
        session::{Credentials, Session},
    },
    remote::{
        contract::{call, CallError},
        requests::{
            AddPostRequest, DeleteAccountRequest, DeletePostRequest, FinishResetPasswordRequest,
            GetPostsRequest, RegisterUserRequest, SignInRequest, StartResetPasswordRequest,
            VerifyUserRequest,
        },
        RemoteChannel,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInInput {
    SignIn(Credentials),
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInChange {
    SignedIn { user: String },
    /// Local only; the token is dropped without contacting the backend.
    SignedOut { user: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationInput {
    Start {
        credentials: Credentials,
        email: String,
    },
    /// The username is typed again rather than taken from the pending marker.
    Confirm {
        username: String,
        confirmation_code: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationChange {
    Started { user: String },
    Confirmed { user: String },
}

#[derive(Clone, PartialEq, Eq)]
pub enum ResetInput {
    Start,
    Confirm {
        confirmation_code: String,
        new_password: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetChange {
    Started { user: String },
    Completed { user: String },
}

/// Result of a successful post: the refreshed list, or why it could not be
/// fetched. The post itself succeeded either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posted {
    pub posts: Outcome<Vec<Message>>,
}

/// Actions that need a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    ResetPassword,
    PostMessage,
    DeleteAccount,
    DeletePost,
}

impl GuardedAction {
    fn requirement_message(self) -> &'static str {
        match self {
            Self::ResetPassword => "You must be signed in to change password.",
            Self::PostMessage => "You must be signed in to post a message.",
            Self::DeleteAccount => "You must be signed in to delete an account.",
            Self::DeletePost => "You must be signed in to delete a post.",
        }
    }
}

pub struct Coordinator<C: RemoteChannel> {
    channel: C,
    session: Session,
    default_post_count: u64,
}

impl<C: RemoteChannel> Coordinator<C> {
    pub fn new(channel: C, default_post_count: u64) -> Self {
        Self {
            channel,
            session: Session::default(),
            default_post_count: default_post_count.max(1),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn default_post_count(&self) -> u64 {
        self.default_post_count
    }

    #[cfg(test)]
    pub(crate) fn channel(&self) -> &C {
        &self.channel
    }

    /// Fetches up to `count` posts, oldest first. Zero means the default.
    pub fn list_posts(&mut self, count: u64) -> Outcome<Vec<Message>> {
        let count = if count == 0 {
            self.default_post_count
        } else {
            count
        };

        tracing::debug!(count, "getting posts");
        call(&mut self.channel, &GetPostsRequest::new(count))
            .map_err(|error| failure_from_call("Could not get posts", error))
    }

    pub fn toggle_sign_in(&mut self, input: SignInInput) -> Outcome<SignInChange> {
        match input {
            SignInInput::SignOut => {
                let Some(user) = self.session.signed_in_user().map(ToOwned::to_owned) else {
                    return Err(Failure::validation("You are not signed in."));
                };

                self.session.end_session();
                tracing::info!(user = %user, "signed out");
                Ok(SignInChange::SignedOut { user })
            }
            SignInInput::SignIn(credentials) => {
                if let Some(user) = self.session.signed_in_user() {
                    return Err(Failure::validation(format!(
                        "You are already signed in as {user}. Sign out first."
                    )));
                }
                let username = require_username(&credentials.username)?;

                tracing::debug!(user = %username, "signing in");
                let token = call(
                    &mut self.channel,
                    &SignInRequest::new(username.clone(), credentials.password),
                )
                .map_err(|error| {
                    failure_from_call(&format!("Could not sign in user {username}"), error)
                })?;

                self.session.begin_session(username.clone(), token);
                tracing::info!(user = %username, "signed in");
                Ok(SignInChange::SignedIn { user: username })
            }
        }
    }

    pub fn toggle_registration(
        &mut self,
        input: RegistrationInput,
    ) -> Outcome<RegistrationChange> {
        match input {
            RegistrationInput::Start { credentials, email } => {
                if let Some(pending) = self.session.pending_registration_user() {
                    return Err(Failure::validation(format!(
                        "Registration for {pending} is already in progress. Finish it with the verification code first."
                    )));
                }
                let username = require_username(&credentials.username)?;

                tracing::debug!(user = %username, "registering user");
                call(
                    &mut self.channel,
                    &RegisterUserRequest {
                        user_name: username.clone(),
                        password: credentials.password,
                        email: email.trim().to_owned(),
                    },
                )
                .map_err(|error| failure_from_call("Could not register user", error))?;

                self.session.begin_registration(username.clone());
                Ok(RegistrationChange::Started { user: username })
            }
            RegistrationInput::Confirm {
                username,
                confirmation_code,
            } => {
                let Some(pending) = self.session.pending_registration_user() else {
                    return Err(Failure::validation(
                        "No registration is in progress. Register as a new user first.",
                    ));
                };
                let username = require_username(&username)?;

                if pending != username {
                    tracing::warn!(
                        pending = %pending,
                        confirming = %username,
                        "confirming registration for a different user than the pending one"
                    );
                }

                tracing::debug!(user = %username, "verifying user");
                call(
                    &mut self.channel,
                    &VerifyUserRequest {
                        user_name: username.clone(),
                        confirmation_code: confirmation_code.trim().to_owned(),
                    },
                )
                .map_err(|error| failure_from_call("Could not verify user", error))?;

                self.session.end_registration();
                Ok(RegistrationChange::Confirmed { user: username })
            }
        }
    }

    pub fn toggle_reset_password(&mut self, input: ResetInput) -> Outcome<ResetChange> {
        let user = self
            .require_signed_in(GuardedAction::ResetPassword)?
            .to_owned();

        match input {
            ResetInput::Start => {
                if let Some(pending) = self.session.pending_password_reset_user() {
                    return Err(Failure::validation(format!(
                        "A password reset for {pending} is already in progress. Finish it with the confirmation code."
                    )));
                }

                tracing::debug!(user = %user, "submitting reset password request");
                call(
                    &mut self.channel,
                    &StartResetPasswordRequest {
                        user_name: user.clone(),
                    },
                )
                .map_err(|error| failure_from_call("Could not start resetting password", error))?;

                self.session.begin_password_reset(user.clone());
                Ok(ResetChange::Started { user })
            }
            ResetInput::Confirm {
                confirmation_code,
                new_password,
            } => {
                if !self.session.is_resetting_password() {
                    return Err(Failure::validation(
                        "No password reset is in progress. Start one first.",
                    ));
                }

                tracing::debug!(user = %user, "changing password");
                call(
                    &mut self.channel,
                    &FinishResetPasswordRequest {
                        user_name: user.clone(),
                        confirmation_code: confirmation_code.trim().to_owned(),
                        new_password,
                    },
                )
                .map_err(|error| failure_from_call("Could not reset password", error))?;

                self.session.end_password_reset();
                Ok(ResetChange::Completed { user })
            }
        }
    }

    /// Posts `text` and then re-reads the default number of posts.
    pub fn post_message(&mut self, text: &str) -> Outcome<Posted> {
        let (_, token) = self.identity_for(GuardedAction::PostMessage)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Failure::validation("Message cannot be empty."));
        }

        tracing::debug!("posting message");
        call(
            &mut self.channel,
            &AddPostRequest {
                access_token: token,
                message: text.to_owned(),
            },
        )
        .map_err(|error| failure_from_call("Could not post your message", error))?;

        let posts = self.list_posts(self.default_post_count);
        Ok(Posted { posts })
    }

    /// Deletes the signed-in account and clears the whole session.
    /// Returns the name of the deleted account.
    pub fn delete_account(&mut self) -> Outcome<String> {
        let (user, token) = self.identity_for(GuardedAction::DeleteAccount)?;

        tracing::debug!(user = %user, "deleting account");
        call(
            &mut self.channel,
            &DeleteAccountRequest {
                access_token: token,
            },
        )
        .map_err(|error| failure_from_call("Could not delete user", error))?;

        self.session.end_session();
        self.session.end_password_reset();
        tracing::info!(user = %user, "account deleted");
        Ok(user)
    }

    /// Deletes a post by its identifier (the post's timestamp).
    pub fn delete_post(&mut self, post_id: &str) -> Outcome<()> {
        let (_, token) = self.identity_for(GuardedAction::DeletePost)?;

        let post_id = post_id.trim();
        if post_id.is_empty() {
            return Err(Failure::validation("Post ID cannot be empty."));
        }

        tracing::debug!(post_id, "deleting post");
        call(&mut self.channel, &DeletePostRequest::new(token, post_id))
            .map_err(|error| failure_from_call("Could not delete post", error))
    }

    /// Returns the signed-in user, or the validation failure for `action`.
    pub fn require_signed_in(&self, action: GuardedAction) -> Outcome<&str> {
        self.session
            .signed_in_user()
            .ok_or_else(|| Failure::validation(action.requirement_message()))
    }

    fn identity_for(&self, action: GuardedAction) -> Outcome<(String, String)> {
        match (self.session.signed_in_user(), self.session.access_token()) {
            (Some(user), Some(token)) => Ok((user.to_owned(), token.to_owned())),
            _ => Err(Failure::validation(action.requirement_message())),
        }
    }
}

fn require_username(raw: &str) -> Outcome<String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(Failure::validation("Username cannot be empty."));
    }
    Ok(username.to_owned())
}

fn failure_from_call(context: &str, error: CallError) -> Failure {
    match error {
        CallError::Remote { message, .. } => Failure::remote(format!("{context}: {message}")),
        other => Failure::transport(format!("{context}: {other}")),
    }
}
