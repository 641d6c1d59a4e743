use super::Error;

/// Error when the store answers with something Quarry cannot use.
///
/// This occurs when:
/// - A query in count mode returns ids, or a fetch query returns a count
/// - An alias resolves to a source path without a numeric id
/// - A primary key value cannot be read as an id
#[derive(Debug)]
pub(super) enum InvalidResult {
    /// The response was of the other kind
    Response {
        expected: &'static str,
        actual: &'static str,
    },

    Message(Box<str>),
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            InvalidResult::Response { expected, actual } => {
                write!(f, "invalid result: expected {expected}, got {actual}")
            }
            InvalidResult::Message(message) => write!(f, "invalid result: {message}"),
        }
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult::Message(
            message.into().into(),
        )))
    }

    /// Creates an error for a query response of the wrong kind, e.g. a count
    /// where ids were expected.
    pub fn unexpected_response(expected: &'static str, actual: &'static str) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult::Response {
            expected,
            actual,
        }))
    }

    /// Returns `true` if this error is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidResult(_))
    }
}
