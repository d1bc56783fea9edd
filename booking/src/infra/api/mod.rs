//! [`Api`]-related implementations.

#[cfg(feature = "fixture")]
pub mod fixture;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "fixture")]
pub use self::fixture::Fixture;

/// Operation of a booking backend.
pub use common::Handler as Api;

/// [`Api`] error.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Backend refused the operation, explaining the reason with a detail
    /// message meant for a customer.
    #[display("{_0}")]
    Rejected(#[error(not(source))] String),

    /// Backend cannot be reached.
    #[display("Backend is unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}

impl Error {
    /// Returns the customer-facing detail message of this [`Error`].
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Rejected(detail) | Self::Unavailable(detail) => detail,
        }
    }
}
