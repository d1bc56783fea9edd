//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Every collaborator seam (fetching catalogs, submitting bookings) is
/// expressed as a [`Handler`] parametrized by the operation it performs, so a
/// single type may serve many operations.
///
/// # Example
///
/// ```rust
/// # use std::convert::Infallible;
/// # use common::{operations::{All, Select}, Handler};
/// #
/// struct Catalog;
///
/// impl Handler<Select<All<String>>> for Catalog {
///     type Ok = Vec<String>;
///     type Err = Infallible;
///
///     async fn execute(
///         &self,
///         _: Select<All<String>>,
///     ) -> Result<Self::Ok, Self::Err> {
///         Ok(vec!["Deep Cleaning".to_owned()])
///     }
/// }
/// ```
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
