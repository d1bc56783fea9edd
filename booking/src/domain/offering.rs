//! [`ServiceOffer`] definitions.

use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{self, Multiplier, ServiceKind};

/// Names of the services a customer may book.
pub const ALLOWED_SERVICES: [&str; 3] =
    ["Standard Cleaning", "Deep Cleaning", "Move In/Out"];

/// Cleaning service offered by a backend.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ServiceOffer {
    /// ID of this [`ServiceOffer`].
    pub id: Id,

    /// Name of this [`ServiceOffer`].
    pub name: String,

    /// Base price of this [`ServiceOffer`] as reported by the backend.
    #[serde(default)]
    pub base_price: Decimal,
}

impl ServiceOffer {
    /// Returns the [`ServiceKind`] of this [`ServiceOffer`], if it's a known
    /// one.
    #[must_use]
    pub fn kind(&self) -> Option<ServiceKind> {
        ServiceKind::matching(&self.name)
    }

    /// Returns the price [`Multiplier`] of this [`ServiceOffer`].
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.kind().map_or(Multiplier::ONE, ServiceKind::multiplier)
    }

    /// Indicates whether this [`ServiceOffer`] is one of the `allowed`
    /// services.
    ///
    /// A name containing an allowed one (`Deep Cleaning Plus`) is allowed too.
    #[must_use]
    pub fn is_allowed<S: AsRef<str>>(&self, allowed: &[S]) -> bool {
        let name = catalog::normalize(&self.name);
        allowed
            .iter()
            .any(|a| name.contains(&catalog::normalize(a.as_ref())))
    }
}

/// Retains only the `allowed` [`ServiceOffer`]s, keeping their order.
#[must_use]
pub fn filter_allowed<S: AsRef<str>>(
    offers: Vec<ServiceOffer>,
    allowed: &[S],
) -> Vec<ServiceOffer> {
    offers.into_iter().filter(|o| o.is_allowed(allowed)).collect()
}

/// Picks the [`ServiceOffer`] a booking preselects: the `preferred` one if
/// it's offered, otherwise the first one.
#[must_use]
pub fn preselect(
    offers: &[ServiceOffer],
    preferred: Option<Id>,
) -> Option<&ServiceOffer> {
    preferred
        .and_then(|id| offers.iter().find(|o| o.id == id))
        .or_else(|| offers.first())
}

/// ID of a [`ServiceOffer`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(i64);
