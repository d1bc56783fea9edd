//! [`Config`]-related definitions.

use std::sync::Arc;

use booking::{
    domain::{
        catalog::{self, Hours},
        offering, AddOn, Address, Catalog, Clock, ServiceOffer,
    },
    infra::Fixture,
};
use common::{money::Currency, Money, Percent};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::Deserialize;
use smart_default::SmartDefault;
use time::UtcOffset;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pricing configuration.
    pub pricing: Pricing,

    /// Booking configuration.
    pub booking: Booking,

    /// Backend configuration.
    pub backend: Backend,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Builds the [`booking::Config`] out of this [`Config`].
    ///
    /// # Errors
    ///
    /// If any of the pricing or locale values is out of range.
    pub fn service(&self) -> Result<booking::Config, Invalid> {
        let Pricing {
            hourly_rate,
            currency,
            pay_now_discount,
        } = &self.pricing;
        let Booking {
            allowed_services,
            utc_offset,
            default_hours,
        } = &self.booking;

        let currency = Currency::from_code(currency)
            .ok_or_else(|| Invalid::Currency(currency.clone()))?;
        let discount = Percent::new(Decimal::from(*pay_now_discount))
            .ok_or(Invalid::Discount(*pay_now_discount))?;
        let offset =
            UtcOffset::from_hms(*utc_offset, 0, 0).map_err(Invalid::Offset)?;
        let catalog = Catalog::new(Money::new(*hourly_rate, currency))
            .with_default_hours(Hours::new(*default_hours));

        Ok(booking::Config {
            catalog: Arc::new(catalog),
            allowed_services: allowed_services.clone(),
            clock: Clock::system(offset),
            pay_now_discount: discount,
        })
    }
}

/// Error of an out of range [`Config`] value.
#[derive(Clone, Debug, Display, Error)]
pub enum Invalid {
    /// Unsupported currency code.
    #[display("unknown currency `{_0}`")]
    Currency(#[error(not(source))] String),

    /// Pay-now discount is over 100%.
    #[display("pay-now discount of {_0}% is out of range")]
    Discount(#[error(not(source))] u8),

    /// UTC offset is over 25 hours.
    #[display("UTC offset is out of range: {_0}")]
    Offset(time::error::ComponentRange),
}

/// Pricing configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pricing {
    /// Base hourly rate of a standard cleaning, in whole currency units.
    #[default(catalog::BASE_HOURLY_RATE)]
    pub hourly_rate: u32,

    /// ISO 4217 code of the currency prices are in.
    #[default("AED".to_owned())]
    pub currency: String,

    /// Discount for paying upfront, in percents.
    #[default(booking::PAY_NOW_DISCOUNT)]
    pub pay_now_discount: u8,
}

/// Booking configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Booking {
    /// Names of the services a customer may book.
    #[default(Vec::from(offering::ALLOWED_SERVICES.map(ToOwned::to_owned)))]
    pub allowed_services: Vec<String>,

    /// UTC offset of the customer's locale, in hours.
    #[default(4)]
    pub utc_offset: i8,

    /// Number of hours preselected when booking by hours.
    #[default(2)]
    pub default_hours: u8,
}

/// Backend configuration.
///
/// Bookings are served by an in-memory backend holding these collections.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Saved addresses of the customer.
    #[default(vec![Address {
        id: 1.into(),
        label: Some("Home".to_owned()),
        address: "Marina Walk, Tower 3, Apt 1204".to_owned(),
        city: "Dubai".to_owned(),
        postal_code: None,
        is_default: true,
    }])]
    pub addresses: Vec<Address>,

    /// Offered services.
    #[default(vec![
        service(1, "Standard Cleaning", 150),
        service(2, "Deep Cleaning", 300),
        service(3, "Move In/Out", 375),
        service(4, "Sofa Shampooing", 120),
    ])]
    pub services: Vec<ServiceOffer>,

    /// Offered add-ons.
    #[default(vec![
        add_on(1, "Inside Fridge", 40),
        add_on(2, "Inside Oven", 50),
        add_on(3, "Ironing", 60),
    ])]
    pub add_ons: Vec<AddOn>,

    /// Detail message every submitted booking is rejected with, if any.
    pub reject: Option<String>,
}

impl From<Backend> for Fixture {
    fn from(value: Backend) -> Self {
        let Backend {
            addresses,
            services,
            add_ons,
            reject,
        } = value;

        let fixture = Self::new()
            .with_addresses(addresses)
            .with_services(services)
            .with_add_ons(add_ons);
        match reject {
            Some(detail) => fixture.rejecting(detail),
            None => fixture,
        }
    }
}

/// Creates a new [`ServiceOffer`] for the default [`Backend`].
fn service(id: i64, name: &str, base_price: u32) -> ServiceOffer {
    ServiceOffer {
        id: id.into(),
        name: name.to_owned(),
        base_price: Decimal::from(base_price),
    }
}

/// Creates a new [`AddOn`] for the default [`Backend`].
fn add_on(id: i64, name: &str, price: u32) -> AddOn {
    AddOn {
        id: id.into(),
        name: name.to_owned(),
        price: Decimal::from(price),
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
