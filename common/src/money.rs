//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::{define_kind, Percent};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] of the provided `amount` in the `currency`.
    #[must_use]
    pub fn new(amount: impl Into<Decimal>, currency: Currency) -> Self {
        Self {
            amount: amount.into(),
            currency,
        }
    }

    /// Creates a zero [`Money`] in the provided `currency`.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Scales this [`Money`] by the provided `factor`, keeping the exact
    /// (non-rounded) result.
    #[must_use]
    pub fn scale(self, factor: Decimal) -> Self {
        Self {
            amount: self.amount * factor,
            currency: self.currency,
        }
    }

    /// Rounds this [`Money`] to whole currency units.
    ///
    /// Midpoints are rounded away from zero, so `187.5` becomes `188`.
    #[must_use]
    pub fn round(self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }

    /// Returns the provided [`Percent`] of this [`Money`], not rounded.
    #[must_use]
    pub fn percent(self, percent: Percent) -> Self {
        self.scale(percent.fraction())
    }

    /// Indicates whether this [`Money`] is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Sums the provided amounts, starting from zero in the `currency`.
    pub fn sum(
        currency: Currency,
        amounts: impl IntoIterator<Item = Self>,
    ) -> Self {
        amounts
            .into_iter()
            .fold(Self::zero(currency), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{}", amount.to_i128().expect("integer"), currency.code())
        } else {
            write!(f, "{}{}", amount.normalize(), currency.code())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }
        if !s.is_char_boundary(s.len() - 3) {
            return Err("invalid currency");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = Currency::from_code(currency).ok_or("invalid currency")?;

        Ok(Self { amount, currency })
    }
}

/// Adds amounts of the same [`Currency`].
///
/// # Panics
///
/// In debug builds, if the [`Currency`] of the operands differs.
impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch");
        Self {
            amount: self.amount + rhs.amount,
            currency: self.currency,
        }
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch");
        Self {
            amount: self.amount - rhs.amount,
            currency: self.currency,
        }
    }
}

impl ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self {
            amount: self.amount * Decimal::from(rhs),
            currency: self.currency,
        }
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Russian Ruble."]
        Rub = 3,

        #[doc = "UAE Dirham."]
        Aed = 4,
    }
}

impl Currency {
    /// Returns the three-letter ISO 4217 code of this [`Currency`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Rub => "RUB",
            Self::Aed => "AED",
        }
    }

    /// Parses a [`Currency`] from its three-letter ISO 4217 code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

#[cfg(test)]
mod spec {
    use std::{iter, str::FromStr as _};

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn aed(s: &str) -> Money {
        Money::new(decimal(s), Currency::Aed)
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("300AED").unwrap(),
            Money {
                amount: decimal("300"),
                currency: Currency::Aed,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
        assert!(Money::from_str("123.00EUR").is_ok());
        assert!(Money::from_str("123RUB").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(aed("123.45").to_string(), "123.45AED");
        assert_eq!(aed("123.00").to_string(), "123AED");
        assert_eq!(aed("187.50").to_string(), "187.5AED");
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(aed("187.5").round(), aed("188"));
        assert_eq!(aed("562.49").round(), aed("562"));
        assert_eq!(aed("300").round(), aed("300"));
    }

    #[test]
    fn scales_exactly() {
        assert_eq!(aed("75").scale(decimal("2.5")), aed("187.5"));
        assert_eq!(aed("150").scale(Decimal::ONE), aed("150"));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(aed("300") + aed("45"), aed("345"));
        assert_eq!(aed("300") - aed("15"), aed("285"));
        assert_eq!(aed("345") * 3, aed("1035"));
        assert_eq!(
            Money::sum(Currency::Aed, [aed("10"), aed("20.5")]),
            aed("30.5"),
        );
        assert_eq!(Money::sum(Currency::Aed, iter::empty()), Money::zero(Currency::Aed));
    }

    #[test]
    fn takes_percent() {
        let five = Percent::from_str("5").unwrap();
        assert_eq!(aed("300").percent(five), aed("15"));
    }
}
