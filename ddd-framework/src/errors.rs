use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for repository and index synchronization operations.
///
/// Each kind describes a category of failure so callers can react precisely,
/// e.g. retry on [`ErrorKind::ConnectivityError`] but fix the declaration on
/// [`ErrorKind::ConfigurationError`].
///
/// # Examples
///
/// ```rust
/// use ddd_framework::errors::{ErrorKind, FrameworkError, FrameworkResult};
///
/// fn example() -> FrameworkResult<()> {
///     Err(FrameworkError::new("Index not found", ErrorKind::IndexNotFound))
/// }
/// assert!(example().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Resolution Errors
    /// Database or collection could not be resolved
    ConnectivityError,

    // Indexing Errors
    /// Listing the existing indexes of a collection failed
    IndexListingError,
    /// A drop or create operation was rejected by the store
    IndexMutationError,
    /// The index being created already exists on the store
    IndexAlreadyExists,
    /// The index being dropped does not exist on the store
    IndexNotFound,

    // Validation Errors
    /// Declarative repository or index configuration is invalid
    ConfigurationError,
    /// The provided identifier is invalid
    InvalidId,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConnectivityError => write!(f, "Connectivity error"),
            ErrorKind::IndexListingError => write!(f, "Index listing error"),
            ErrorKind::IndexMutationError => write!(f, "Index mutation error"),
            ErrorKind::IndexAlreadyExists => write!(f, "Index already exists"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::ConfigurationError => write!(f, "Configuration error"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of the framework.
///
/// `FrameworkError` carries a message, an [`ErrorKind`], an optional cause and
/// the backtrace captured where it was raised. Errors raised by a store
/// collaborator are usually wrapped as the cause of an error whose kind
/// describes the failed step (listing, mutation, resolution).
///
/// # Examples
///
/// ```rust
/// use ddd_framework::errors::{ErrorKind, FrameworkError};
///
/// let cause = FrameworkError::new("connection refused", ErrorKind::ConnectivityError);
/// let err = FrameworkError::new_with_cause(
///     "Failed to list indexes",
///     ErrorKind::IndexListingError,
///     cause,
/// );
/// assert_eq!(err.kind(), &ErrorKind::IndexListingError);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct FrameworkError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<FrameworkError>>,
    backtrace: Atomic<Backtrace>,
}

impl FrameworkError {
    /// Creates a new `FrameworkError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        FrameworkError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `FrameworkError` wrapping a cause error.
    ///
    /// The cause is preserved and exposed through [`Error::source`].
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: FrameworkError) -> Self {
        FrameworkError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&FrameworkError> {
        self.cause.as_deref()
    }

    /// Returns `true` if this error or any error in its cause chain has the given kind.
    pub fn has_kind(&self, kind: &ErrorKind) -> bool {
        if &self.error_kind == kind {
            return true;
        }
        match &self.cause {
            Some(cause) => cause.has_kind(kind),
            None => false,
        }
    }
}

impl Display for FrameworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for FrameworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for FrameworkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for framework operations.
pub type FrameworkResult<T> = Result<T, FrameworkError>;
