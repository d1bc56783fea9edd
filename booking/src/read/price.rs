//! [`PriceBreakdown`] definition.

use common::{Money, Percent};

use crate::domain::{catalog::Multiplier, draft::PaymentMode, Draft};

/// Breakdown of a booking price for displaying.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceBreakdown {
    /// Price of the chosen size or hours before the service [`Multiplier`],
    /// shown struck through for premium services.
    pub list_price: Money,

    /// Price of the chosen size or hours for the chosen service.
    pub base_price: Money,

    /// Price of the chosen add-ons for a single visit.
    pub add_ons: Money,

    /// Price of a single visit.
    pub per_visit: Money,

    /// Number of visits.
    pub visits: usize,

    /// Price of every visit together.
    pub total: Money,

    /// [`Multiplier`] of the chosen service.
    pub multiplier: Multiplier,

    /// Rate badge of a premium service (`2x rate`).
    pub badge: Option<String>,

    /// Hourly rate of the chosen service.
    pub hourly_rate: Money,

    /// [`PaymentMode`] the booking is paid with.
    pub payment_mode: PaymentMode,

    /// Advertised discount for paying upfront.
    pub discount: Percent,

    /// Amount saved by paying upfront.
    pub saving: Money,
}

impl PriceBreakdown {
    /// Computes the [`PriceBreakdown`] of the provided [`Draft`], advertising
    /// the provided `discount` for paying upfront.
    #[must_use]
    pub fn new(draft: &Draft, discount: Percent) -> Self {
        let multiplier = draft.multiplier();
        let total = draft.total_price();
        Self {
            list_price: draft.list_price(),
            base_price: draft.base_price(),
            add_ons: draft.add_ons_total(),
            per_visit: draft.per_visit_price(),
            visits: draft.visit_count(),
            total,
            multiplier,
            badge: multiplier.badge(),
            hourly_rate: multiplier.apply(draft.catalog().hourly_rate()),
            payment_mode: draft.payment_mode(),
            discount,
            saving: total.percent(discount).round(),
        }
    }

    /// Indicates whether the price differs from the list one.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.multiplier.is_premium()
    }

    /// Returns the total with the upfront payment discount taken off.
    #[must_use]
    pub fn discounted_total(&self) -> Money {
        self.total - self.saving
    }

    /// Returns the amount a customer is expected to pay with the chosen
    /// [`PaymentMode`].
    #[must_use]
    pub fn due(&self) -> Money {
        match self.payment_mode {
            PaymentMode::PayNow => self.discounted_total(),
            PaymentMode::PayLater => self.total,
        }
    }
}
