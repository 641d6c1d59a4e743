use super::Error;

/// Error when an entity does not satisfy a mutation precondition.
///
/// This occurs when:
/// - `save()` is called on a model that requires a bundle but declares none
/// - `save()` is called before a required parent reference (e.g. `vid`) is set
/// - `delete()` is called on an entity without a primary key
///
/// It is raised before the driver is contacted.
#[derive(Debug)]
pub(super) struct InvalidEntity {
    message: Box<str>,
}

impl std::error::Error for InvalidEntity {}

impl core::fmt::Display for InvalidEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid entity: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid entity error.
    pub fn invalid_entity(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidEntity(InvalidEntity {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid entity error.
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidEntity(_))
    }
}
