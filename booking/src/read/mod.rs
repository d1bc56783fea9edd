//! Read-only projections of a [`Draft`] for displaying.
//!
//! [`Draft`]: crate::domain::Draft

pub mod price;
pub mod summary;

use common::Money;

pub use self::price::PriceBreakdown;

/// Formats the provided [`Money`] the way prices are displayed to customers
/// (`AED 150`).
#[must_use]
pub fn display_price(price: Money) -> String {
    format!("{} {}", price.currency.code(), price.amount.normalize())
}
