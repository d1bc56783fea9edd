//! [`Address`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Saved address of a customer a cleaning happens at.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Address {
    /// ID of this [`Address`].
    pub id: Id,

    /// Customer-given label of this [`Address`] (`Home`, `Office`).
    #[serde(default)]
    pub label: Option<String>,

    /// Street address line.
    pub address: String,

    /// City of this [`Address`].
    pub city: String,

    /// Postal code of this [`Address`].
    #[serde(default)]
    pub postal_code: Option<String>,

    /// Indicator whether this [`Address`] is the customer's default one.
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    /// Picks the [`Address`] a booking preselects: the one marked as default,
    /// otherwise the first one.
    #[must_use]
    pub fn preferred(addresses: &[Self]) -> Option<&Self> {
        addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| addresses.first())
    }

    /// Returns the short name of this [`Address`] for display: its label, or
    /// the street address if there is no label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.address)
    }
}

/// ID of an [`Address`].
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
