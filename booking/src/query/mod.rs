//! [`Query`] definition.

pub mod add_ons;
pub mod default_address;
pub mod service_offers;

use common::operations::{All, Select};
use tracerr::Traced;

use crate::{
    infra::{api, Api},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    add_ons::AddOns, default_address::DefaultAddress,
    service_offers::ServiceOffers,
};

/// [`Query`] [`Select`]ing a `T`ype from an [`Api`].
#[derive(Clone, Copy, Debug, Default)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct ApiQuery<T>(T);

impl<T> ApiQuery<All<T>> {
    /// Creates a new [`ApiQuery`] selecting every available `T`.
    #[must_use]
    pub const fn all() -> Self {
        Self(All::new())
    }
}

impl<A, T> Query<ApiQuery<All<T>>> for Service<A>
where
    A: Api<Select<All<T>>, Ok = Vec<T>, Err = Traced<api::Error>>,
{
    type Ok = Vec<T>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ApiQuery(all): ApiQuery<All<T>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api().execute(Select(all)).await.map_err(tracerr::wrap!())
    }
}
