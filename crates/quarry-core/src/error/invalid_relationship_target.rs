use super::Error;

/// Error when a relationship names a target model the `Db` does not know.
#[derive(Debug)]
pub(super) struct InvalidRelationshipTarget {
    source_model: Box<str>,
    target_model: Box<str>,
}

impl std::error::Error for InvalidRelationshipTarget {}

impl core::fmt::Display for InvalidRelationshipTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid relationship target: `{}` (declared on `{}`) is not a registered model",
            self.target_model, self.source_model
        )
    }
}

impl Error {
    /// Creates an invalid relationship target error.
    pub fn invalid_relationship_target(
        source_model: impl Into<String>,
        target_model: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidRelationshipTarget(
            InvalidRelationshipTarget {
                source_model: source_model.into().into(),
                target_model: target_model.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid relationship target error.
    pub fn is_invalid_relationship_target(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidRelationshipTarget(_))
    }
}
