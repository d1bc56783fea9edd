//! [`AddOn`] definitions.

use std::collections::{BTreeSet, HashMap};

use common::{money::Currency, Money};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extra task a cleaning may include for an additional price.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AddOn {
    /// ID of this [`AddOn`].
    pub id: Id,

    /// Name of this [`AddOn`] (`Inside Fridge`).
    pub name: String,

    /// Price of this [`AddOn`] per visit, in whole currency units.
    pub price: Decimal,
}

/// Per-visit prices of [`AddOn`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prices(HashMap<Id, Decimal>);

impl Prices {
    /// Returns the price of the [`AddOn`] with the provided `id`, if it's
    /// known.
    #[must_use]
    pub fn get(&self, id: Id) -> Option<Decimal> {
        self.0.get(&id).copied()
    }

    /// Sums the prices of the provided [`AddOn`]s in the `currency`.
    ///
    /// Unknown [`AddOn`]s cost nothing.
    #[must_use]
    pub fn total(&self, ids: &BTreeSet<Id>, currency: Currency) -> Money {
        Money::sum(
            currency,
            ids.iter()
                .filter_map(|id| self.get(*id))
                .map(|p| Money::new(p, currency)),
        )
    }
}

impl<'a> FromIterator<&'a AddOn> for Prices {
    fn from_iter<I: IntoIterator<Item = &'a AddOn>>(iter: I) -> Self {
        Self(iter.into_iter().map(|a| (a.id, a.price)).collect())
    }
}

impl FromIterator<(Id, Decimal)> for Prices {
    fn from_iter<I: IntoIterator<Item = (Id, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// ID of an [`AddOn`].
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
