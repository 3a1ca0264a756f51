use std::fmt;

/// Username and password held for the duration of a single call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
struct Identity {
    user: String,
    access_token: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Process-local session record: who is signed in and which two-step flows
/// are waiting for confirmation.
///
/// User and token live together, so one is present exactly when the other is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    pending_registration_user: Option<String>,
    pending_password_reset_user: Option<String>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_registering(&self) -> bool {
        self.pending_registration_user.is_some()
    }

    pub fn is_resetting_password(&self) -> bool {
        self.pending_password_reset_user.is_some()
    }

    pub fn signed_in_user(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.user.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .map(|identity| identity.access_token.as_str())
    }

    pub fn pending_registration_user(&self) -> Option<&str> {
        self.pending_registration_user.as_deref()
    }

    pub fn pending_password_reset_user(&self) -> Option<&str> {
        self.pending_password_reset_user.as_deref()
    }

    /// A pending password reset survives only if it belongs to the user now
    /// signing in; another user's reset is abandoned.
    pub(crate) fn begin_session(&mut self, user: impl Into<String>, token: impl Into<String>) {
        let user = user.into();
        if self
            .pending_password_reset_user
            .as_deref()
            .is_some_and(|pending| pending != user)
        {
            self.pending_password_reset_user = None;
        }

        self.identity = Some(Identity {
            user,
            access_token: token.into(),
        });
    }

    pub(crate) fn end_session(&mut self) {
        self.identity = None;
    }

    pub(crate) fn begin_registration(&mut self, user: impl Into<String>) {
        self.pending_registration_user = Some(user.into());
    }

    pub(crate) fn end_registration(&mut self) {
        self.pending_registration_user = None;
    }

    pub(crate) fn begin_password_reset(&mut self, user: impl Into<String>) {
        self.pending_password_reset_user = Some(user.into());
    }

    pub(crate) fn end_password_reset(&mut self) {
        self.pending_password_reset_user = None;
    }
}
