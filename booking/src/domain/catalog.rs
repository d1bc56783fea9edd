//! Pricing [`Catalog`] definitions.

use std::{fmt, str::FromStr};

use common::{define_kind, money::Currency, Money};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing as log;

/// Base hourly rate of a standard cleaning, in whole currency units.
pub const BASE_HOURLY_RATE: u32 = 75;

/// Price used for lookups of unknown sizes or hour counts, in whole currency
/// units.
///
/// UI may query a price before anything is selected, so a lookup miss is not
/// an error.
pub const FALLBACK_PRICE: u32 = 150;

/// Immutable pricing tables of a cleaning booking.
///
/// Built once at startup and shared between booking sessions.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Base hourly rate every table is derived from.
    hourly_rate: Money,

    /// House [`SizeTier`]s in their display order.
    sizes: Vec<SizeTier>,

    /// [`HourBlock`]s in their display order.
    hour_blocks: Vec<HourBlock>,

    /// [`Hours`] preselected in the hourly pricing mode.
    default_hours: Hours,
}

impl Catalog {
    /// Size tiers as `(id, label, hours)`.
    const SIZES: [(&'static str, &'static str, u8); 7] = [
        ("studio", "Studio", 2),
        ("1bhk", "1 BHK", 3),
        ("2bhk", "2 BHK", 4),
        ("3bhk", "3 BHK", 5),
        ("4bhk", "4 BHK", 6),
        ("5bhk", "5 BHK", 7),
        ("villa", "Villa", 8),
    ];

    /// Bookable hour counts.
    const HOURS: [u8; 7] = [2, 3, 4, 5, 6, 7, 8];

    /// Creates a new [`Catalog`] deriving every price from the provided base
    /// `hourly_rate`.
    #[must_use]
    pub fn new(hourly_rate: Money) -> Self {
        let sizes = Self::SIZES
            .into_iter()
            .map(|(id, label, hours)| {
                let hours = Hours(hours);
                SizeTier {
                    id: SizeId(id.to_owned()),
                    label,
                    duration: hours.minutes(),
                    price: hourly_rate * u32::from(hours.0),
                }
            })
            .collect();
        let hour_blocks = Self::HOURS
            .into_iter()
            .map(|h| HourBlock {
                hours: Hours(h),
                price: hourly_rate * u32::from(h),
            })
            .collect();

        let mut catalog = Self {
            hourly_rate,
            sizes,
            hour_blocks,
            default_hours: Hours::MIN,
        };
        catalog.default_hours = catalog.min_hours();
        catalog
    }

    /// Preselects the provided [`Hours`] in the hourly pricing mode, if
    /// they're bookable.
    #[must_use]
    pub fn with_default_hours(mut self, hours: Hours) -> Self {
        if self.hour_block(hours).is_some() {
            self.default_hours = hours;
        } else {
            log::warn!("{hours} hours are not bookable, keeping the default");
        }
        self
    }

    /// Returns the base hourly rate of this [`Catalog`].
    #[must_use]
    pub fn hourly_rate(&self) -> Money {
        self.hourly_rate
    }

    /// Returns the [`Currency`] of every price in this [`Catalog`].
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.hourly_rate.currency
    }

    /// Returns all the [`SizeTier`]s in their display order.
    #[must_use]
    pub fn sizes(&self) -> &[SizeTier] {
        &self.sizes
    }

    /// Returns all the [`HourBlock`]s in their display order.
    #[must_use]
    pub fn hour_blocks(&self) -> &[HourBlock] {
        &self.hour_blocks
    }

    /// Looks up a [`SizeTier`] by its ID.
    #[must_use]
    pub fn size(&self, id: &str) -> Option<&SizeTier> {
        self.sizes.iter().find(|s| s.id.0 == id)
    }

    /// Looks up a [`HourBlock`] by its hour count.
    #[must_use]
    pub fn hour_block(&self, hours: Hours) -> Option<&HourBlock> {
        self.hour_blocks.iter().find(|b| b.hours == hours)
    }

    /// Returns the base price of the [`SizeTier`] with the provided ID, or
    /// the [`FALLBACK_PRICE`] if there is no such tier.
    #[must_use]
    pub fn price_for_size(&self, id: &str) -> Money {
        self.size(id).map_or_else(|| self.fallback(), |s| s.price)
    }

    /// Returns the base price of the provided [`Hours`], or the
    /// [`FALLBACK_PRICE`] if they are not bookable.
    #[must_use]
    pub fn price_for_hours(&self, hours: Hours) -> Money {
        self.hour_block(hours)
            .map_or_else(|| self.fallback(), |b| b.price)
    }

    /// Returns the price multiplier of a service with the provided `name`.
    ///
    /// Matching is case-insensitive and by substring, so backend names with
    /// extra words (`Standard Cleaning Service`) still match. Unknown names
    /// are priced as [`ServiceKind::Standard`].
    #[must_use]
    pub fn multiplier_for_service(&self, name: &str) -> Multiplier {
        ServiceKind::matching(name)
            .map_or(Multiplier::ONE, ServiceKind::multiplier)
    }

    /// Returns the minimal bookable [`Hours`].
    #[must_use]
    pub fn min_hours(&self) -> Hours {
        self.hour_blocks
            .iter()
            .map(|b| b.hours)
            .min()
            .unwrap_or(Hours::MIN)
    }

    /// Returns the [`Hours`] preselected in the hourly pricing mode.
    #[must_use]
    pub fn default_hours(&self) -> Hours {
        self.default_hours
    }

    /// Returns the [`FALLBACK_PRICE`] in the [`Currency`] of this
    /// [`Catalog`].
    fn fallback(&self) -> Money {
        Money::new(FALLBACK_PRICE, self.currency())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Money::new(BASE_HOURLY_RATE, Currency::Aed))
    }
}

/// House size tier priced by its expected cleaning duration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SizeTier {
    /// ID of this [`SizeTier`].
    pub id: SizeId,

    /// Human-readable label of this [`SizeTier`].
    pub label: &'static str,

    /// Expected cleaning duration of this [`SizeTier`].
    pub duration: Minutes,

    /// Base price of this [`SizeTier`].
    pub price: Money,
}

/// Bookable number of hours with its base price.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HourBlock {
    /// Number of hours.
    pub hours: Hours,

    /// Base price of these hours.
    pub price: Money,
}

/// ID of a [`SizeTier`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct SizeId(String);

impl SizeId {
    /// Creates a new [`SizeId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Returns this [`SizeId`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `id` is a valid [`SizeId`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for SizeId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SizeId`")
    }
}

/// Number of booked cleaning hours.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Hours(u8);

impl Hours {
    /// Minimal number of hours a cleaning can be booked for.
    pub const MIN: Self = Self(2);

    /// Creates new [`Hours`].
    #[must_use]
    pub const fn new(hours: u8) -> Self {
        Self(hours)
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Converts these [`Hours`] into [`Minutes`].
    #[must_use]
    pub fn minutes(self) -> Minutes {
        Minutes(u32::from(self.0) * 60)
    }

    /// Returns a human-readable label of these [`Hours`].
    #[must_use]
    pub fn label(self) -> String {
        match self.0 {
            1 => "1 Hour".to_owned(),
            n => format!("{n} Hours"),
        }
    }
}

impl FromStr for Hours {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_end_matches("hrs")
            .trim_end_matches('h')
            .parse()
            .map(Self)
            .map_err(|_| "invalid `Hours`")
    }
}

/// Duration in whole minutes.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Minutes(u32);

impl Minutes {
    /// Returns the number of minutes.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Price multiplier applied to base prices depending on a [`ServiceKind`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Multiplier(Decimal);

impl Multiplier {
    /// Multiplier keeping base prices as is.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Returns the factor of this [`Multiplier`].
    #[must_use]
    pub fn factor(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Multiplier`] raises prices.
    #[must_use]
    pub fn is_premium(self) -> bool {
        self.0 > Decimal::ONE
    }

    /// Applies this [`Multiplier`] to the provided base `price`, rounding the
    /// result to whole currency units.
    #[must_use]
    pub fn apply(self, price: Money) -> Money {
        price.scale(self.0).round()
    }

    /// Returns the rate badge text (`2x rate`), if this [`Multiplier`] is a
    /// premium one.
    #[must_use]
    pub fn badge(self) -> Option<String> {
        self.is_premium().then(|| format!("{self} rate"))
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0.normalize())
    }
}

define_kind! {
    #[doc = "Kind of a cleaning service affecting its price."]
    enum ServiceKind {
        #[doc = "Standard cleaning."]
        Standard = 1,

        #[doc = "Deep cleaning."]
        Deep = 2,

        #[doc = "Move in/out cleaning."]
        MoveInOut = 3,
    }
}

impl ServiceKind {
    /// Returns the normalized name fragment identifying this [`ServiceKind`].
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deep => "deep",
            Self::MoveInOut => "move in/out",
        }
    }

    /// Returns the price [`Multiplier`] of this [`ServiceKind`].
    #[must_use]
    pub fn multiplier(self) -> Multiplier {
        Multiplier(match self {
            Self::Standard => Decimal::ONE,
            Self::Deep => Decimal::TWO,
            Self::MoveInOut => Decimal::new(25, 1),
        })
    }

    /// Finds the [`ServiceKind`] whose [`pattern`] is contained in the
    /// provided service `name`.
    ///
    /// Names are compared lowercased, with hyphens read as spaces, so
    /// `Move-In/Out` and `Move In/Out` are the same.
    ///
    /// [`pattern`]: ServiceKind::pattern
    #[must_use]
    pub fn matching(name: &str) -> Option<Self> {
        let name = normalize(name);
        Self::ALL
            .iter()
            .copied()
            .find(|kind| name.contains(kind.pattern()))
    }
}

/// Normalizes the provided service `name` for fuzzy matching.
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase().replace('-', " ")
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;

    use super::{Catalog, Hours, Minutes, Multiplier, ServiceKind};

    fn aed(amount: u32) -> Money {
        Money::new(amount, Currency::Aed)
    }

    #[test]
    fn sizes_are_priced_by_duration() {
        let catalog = Catalog::default();

        let expected: [(&str, u32, u32); 7] = [
            ("studio", 150, 120),
            ("1bhk", 225, 180),
            ("2bhk", 300, 240),
            ("3bhk", 375, 300),
            ("4bhk", 450, 360),
            ("5bhk", 525, 420),
            ("villa", 600, 480),
        ];
        assert_eq!(catalog.sizes().len(), expected.len());
        for (tier, (id, price, minutes)) in catalog.sizes().iter().zip(expected)
        {
            assert_eq!(tier.id.as_str(), id);
            assert_eq!(tier.price, aed(price));
            assert_eq!(tier.duration, Minutes::from(minutes));
            assert_eq!(catalog.price_for_size(id), aed(price));
        }
    }

    #[test]
    fn unknown_size_falls_back() {
        assert_eq!(Catalog::default().price_for_size("castle"), aed(150));
    }

    #[test]
    fn hours_are_priced_by_rate() {
        let catalog = Catalog::default();

        for h in 2..=8 {
            assert_eq!(
                catalog.price_for_hours(Hours::new(h)),
                aed(75 * u32::from(h)),
            );
        }
        assert_eq!(catalog.price_for_hours(Hours::new(12)), aed(150));
        assert_eq!(catalog.min_hours(), Hours::new(2));
        assert_eq!(catalog.default_hours(), Hours::new(2));
    }

    #[test]
    fn custom_rate_rederives_every_table() {
        let catalog = Catalog::new(Money::new(50, Currency::Usd));

        assert_eq!(catalog.price_for_size("villa"), Money::new(400, Currency::Usd));
        assert_eq!(
            catalog.price_for_hours(Hours::new(3)),
            Money::new(150, Currency::Usd),
        );
        assert_eq!(catalog.price_for_size("nope"), Money::new(150, Currency::Usd));
    }

    #[test]
    fn multiplier_matches_fuzzily() {
        let catalog = Catalog::default();

        for (name, factor) in [
            ("Standard Cleaning", Decimal::ONE),
            ("Standard Cleaning Service", Decimal::ONE),
            ("DEEP CLEANING", Decimal::TWO),
            ("Move In/Out", Decimal::new(25, 1)),
            ("Move-In/Out Cleaning", Decimal::new(25, 1)),
            ("Window Washing", Decimal::ONE),
            ("", Decimal::ONE),
        ] {
            assert_eq!(
                catalog.multiplier_for_service(name).factor(),
                factor,
                "{name}",
            );
        }
    }

    #[test]
    fn multiplier_rounds_after_applying() {
        let deep = ServiceKind::Deep.multiplier();
        let move_out = ServiceKind::MoveInOut.multiplier();

        assert_eq!(deep.apply(aed(150)), aed(300));
        assert_eq!(move_out.apply(aed(75)), aed(188));
        assert_eq!(move_out.apply(aed(225)), aed(563));
        assert_eq!(Multiplier::ONE.apply(aed(300)), aed(300));
    }

    #[test]
    fn badge_is_shown_for_premium_rates_only() {
        assert_eq!(Multiplier::ONE.badge(), None);
        assert_eq!(
            ServiceKind::Deep.multiplier().badge().as_deref(),
            Some("2x rate"),
        );
        assert_eq!(
            ServiceKind::MoveInOut.multiplier().badge().as_deref(),
            Some("2.5x rate"),
        );
    }

    #[test]
    fn hours_parse_and_label() {
        assert_eq!("3".parse::<Hours>(), Ok(Hours::new(3)));
        assert_eq!("3hrs".parse::<Hours>(), Ok(Hours::new(3)));
        assert_eq!("3h".parse::<Hours>(), Ok(Hours::new(3)));
        assert!("three".parse::<Hours>().is_err());
        assert_eq!(Hours::new(2).label(), "2 Hours");
        assert_eq!(Hours::new(4).minutes(), Minutes::from(240_u32));
    }

    #[test]
    fn preselects_bookable_default_hours_only() {
        let catalog = Catalog::default().with_default_hours(Hours::new(4));
        assert_eq!(catalog.default_hours(), Hours::new(4));

        let catalog = Catalog::default().with_default_hours(Hours::new(12));
        assert_eq!(catalog.default_hours(), Hours::new(2));
    }
}
