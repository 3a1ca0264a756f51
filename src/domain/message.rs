/// A single chat post as returned by the backend.
///
/// The timestamp stays in its wire form (epoch seconds as a numeric string);
/// it doubles as the post identifier for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub alias: String,
    pub body: String,
    pub timestamp: String,
}

impl Message {
    pub fn new(
        alias: impl Into<String>,
        body: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            body: body.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Returns the timestamp as epoch seconds, or None if it is not numeric.
    pub fn epoch_seconds(&self) -> Option<i64> {
        self.timestamp.trim().parse().ok()
    }
}
