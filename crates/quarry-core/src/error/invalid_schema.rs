use super::Error;

/// Error when a registered model cannot be used.
///
/// Raised by `Builder::build` before the `Db` exists, naming the model and
/// what is wrong with its metadata: an empty entity type, primary key or
/// bundle name.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    model: Box<str>,
    problem: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: model `{}` {}", self.model, self.problem)
    }
}

impl Error {
    /// Creates an invalid schema error for `model`.
    pub fn invalid_schema(model: impl Into<String>, problem: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            model: model.into().into(),
            problem: problem.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
