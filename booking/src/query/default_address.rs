//! [`Query`] for the default [`Address`].

use common::operations::{All, Select};
use tracerr::Traced;

use crate::{
    domain::Address,
    infra::{api, Api},
    Service,
};

use super::Query;

/// [`Query`] for the [`Address`] a booking preselects.
///
/// It's the customer's default [`Address`], otherwise the first saved one, or
/// none if nothing is saved.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAddress;

impl<A> Query<DefaultAddress> for Service<A>
where
    A: Api<Select<All<Address>>, Ok = Vec<Address>, Err = Traced<api::Error>>,
{
    type Ok = Option<Address>;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: DefaultAddress) -> Result<Self::Ok, Self::Err> {
        let addresses = self
            .api()
            .execute(Select(All::new()))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Address::preferred(&addresses).cloned())
    }
}
