use ethif_hal::AdapterError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors surfaced past the driver's own recovery paths.
///
/// Almost everything is handled locally (drops are counted, stalls are
/// reset); what remains is lifecycle misuse and adapter failures during
/// initialization or bring-up. An [`AdapterError::IrqAttach`] out of
/// [`Driver::initialize`](crate::Driver::initialize) is retryable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("interface is already up")]
    AlreadyUp,

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
