//! Uniform outcome of store operations.
//!
//! A successful operation yields an [`Outcome`] holding the payload and a
//! message describing what happened; a failed one yields a [`StoreError`].
//! [`OutcomeExt`] gives both sides the same success/message/data view.

use crate::error::StoreError;

const OK_MESSAGE: &str = "Ok";

/// Payload and message of a successful store operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T = ()> {
    data: T,
    message: String,
}

impl<T> Outcome<T> {
    /// Create an outcome with a payload and message.
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }

    /// Create an outcome with a payload and the default `"Ok"` message.
    pub fn with_data(data: T) -> Self {
        Self::new(data, OK_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn into_parts(self) -> (T, String) {
        (self.data, self.message)
    }
}

impl Outcome<()> {
    /// A bare success with the default `"Ok"` message.
    pub fn ok() -> Self {
        Self::with_data(())
    }

    /// A bare success with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new((), message)
    }
}

impl Default for Outcome<()> {
    fn default() -> Self {
        Self::ok()
    }
}

/// Result alias for store operations.
pub type StoreResult<T = ()> = Result<Outcome<T>, StoreError>;

/// Result of an operation without payload.
pub type SimpleResult = StoreResult<()>;

/// Success/message/data view over a [`StoreResult`].
pub trait OutcomeExt<T> {
    fn is_success(&self) -> bool;

    /// The outcome message on success, the error text on failure.
    fn message(&self) -> String;

    /// The payload; always `None` on failure.
    fn data(&self) -> Option<&T>;
}

impl<T> OutcomeExt<T> for StoreResult<T> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn message(&self) -> String {
        match self {
            Ok(outcome) => outcome.message.clone(),
            Err(err) => err.to_string(),
        }
    }

    fn data(&self) -> Option<&T> {
        self.as_ref().ok().map(|outcome| &outcome.data)
    }
}
