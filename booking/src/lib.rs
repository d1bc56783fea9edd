//! Booking contains the configuration state machine of a cleaning booking.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod flow;
pub mod infra;
pub mod query;
pub mod read;

use std::sync::Arc;

use common::Percent;
use rust_decimal::Decimal;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Api;

use self::domain::{offering, Catalog, Clock};

pub use self::{command::Command, flow::Flow, query::Query};

/// Discount for paying upfront, in percents.
pub const PAY_NOW_DISCOUNT: u8 = 5;

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Pricing [`Catalog`] shared between sessions.
    pub catalog: Arc<Catalog>,

    /// Names of the services a customer may book.
    #[default(Vec::from(offering::ALLOWED_SERVICES.map(ToOwned::to_owned)))]
    pub allowed_services: Vec<String>,

    /// [`Clock`] of the customer's locale.
    pub clock: Clock,

    /// Advertised discount for paying upfront.
    #[default(Percent::new(Decimal::from(PAY_NOW_DISCOUNT)).unwrap_or(Percent::ZERO))]
    pub pay_now_discount: Percent,
}

/// Booking service.
#[derive(Clone, Debug)]
pub struct Service<A> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: A,
}

impl<A> Service<A> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, api: A) -> Self {
        Self { config, api }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }
}
