use super::Error;

/// Error when a driver operation fails.
///
/// Drivers wrap whatever their store reports (I/O, a rejected write, a lost
/// connection) with this kind. Quarry passes it up untouched; the store's
/// own error stays reachable through [`Error::driver_error`].
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut causes = core::iter::successors(
            Some(self.inner.as_ref() as &(dyn std::error::Error + 'static)),
            |err| err.source(),
        );

        if let Some(first) = causes.next() {
            write!(f, "{first}")?;
        }
        for cause in causes {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Wraps an error reported by a store.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a driver operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DriverOperationFailed(_))
    }

    /// The store's own error, for downcasting to the driver's error type.
    pub fn driver_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self.kind() {
            super::ErrorKind::DriverOperationFailed(err) => Some(err.inner.as_ref()),
            _ => None,
        }
    }
}
