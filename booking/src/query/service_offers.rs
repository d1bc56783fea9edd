//! [`Query`] for the bookable [`ServiceOffer`]s.

use common::operations::{All, Select};
use tracerr::Traced;

use crate::{
    domain::{offering, ServiceOffer},
    infra::{api, Api},
    Service,
};

use super::Query;

/// [`Query`] for the [`ServiceOffer`]s a customer may book, in the backend's
/// order.
///
/// Offers missing from the allowed services list are filtered out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceOffers;

impl<A> Query<ServiceOffers> for Service<A>
where
    A: Api<
        Select<All<ServiceOffer>>,
        Ok = Vec<ServiceOffer>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Vec<ServiceOffer>;
    type Err = Traced<api::Error>;

    async fn execute(&self, _: ServiceOffers) -> Result<Self::Ok, Self::Err> {
        let offers = self
            .api()
            .execute(Select(All::new()))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(offering::filter_allowed(
            offers,
            &self.config().allowed_services,
        ))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::ServiceOffer, infra::Fixture, query::Query as _, Config,
        Service,
    };

    use super::ServiceOffers;

    fn offer(id: i64, name: &str) -> ServiceOffer {
        ServiceOffer {
            id: id.into(),
            name: name.to_owned(),
            base_price: Decimal::ONE_HUNDRED,
        }
    }

    #[tokio::test]
    async fn serves_allowed_offers_only() {
        let api = Fixture::new().with_services(vec![
            offer(1, "Sofa Shampooing"),
            offer(2, "Deep Cleaning"),
            offer(3, "Standard Cleaning"),
        ]);
        let svc = Service::new(Config::default(), api);

        let offers = svc.execute(ServiceOffers).await.unwrap();

        assert_eq!(
            offers.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
            ["Deep Cleaning", "Standard Cleaning"],
        );
    }

    #[tokio::test]
    async fn respects_configured_allow_list() {
        let api = Fixture::new()
            .with_services(vec![offer(1, "Sofa Shampooing"), offer(2, "Deep Cleaning")]);
        let config = Config {
            allowed_services: vec!["sofa".to_owned()],
            ..Config::default()
        };
        let svc = Service::new(config, api);

        let offers = svc.execute(ServiceOffers).await.unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id, 1.into());
    }
}
