use thiserror::Error;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A local precondition was not met; the backend was never called.
    Validation,
    /// The backend answered with a non-success status.
    Remote,
    /// The channel could not deliver a call or returned something unreadable.
    Transport,
}

impl FailureKind {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Remote => "REMOTE",
            Self::Transport => "TRANSPORT",
        }
    }
}

/// The only error value that crosses the coordinator boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Remote, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn human_message(&self) -> &str {
        &self.message
    }
}

pub type Outcome<T> = Result<T, Failure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_human_message() {
        let failure = Failure::remote("Could not get posts: table missing");

        assert_eq!(failure.to_string(), "Could not get posts: table missing");
        assert_eq!(failure.kind(), FailureKind::Remote);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(FailureKind::Validation.as_label(), "VALIDATION");
        assert_eq!(FailureKind::Transport.as_label(), "TRANSPORT");
    }
}
