//! [`Clock`] definitions.

use common::DateTime;
use time::{Date, UtcOffset};

/// Source of the current time in the customer's locale.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    /// UTC offset of the customer's locale.
    offset: UtcOffset,

    /// Fixed current time, if this [`Clock`] is frozen.
    frozen: Option<DateTime>,
}

impl Clock {
    /// Creates a new [`Clock`] following the system time.
    #[must_use]
    pub const fn system(offset: UtcOffset) -> Self {
        Self {
            offset,
            frozen: None,
        }
    }

    /// Creates a new [`Clock`] always returning the provided `now`.
    #[must_use]
    pub const fn frozen(now: DateTime, offset: UtcOffset) -> Self {
        Self {
            offset,
            frozen: Some(now),
        }
    }

    /// Returns the UTC offset of the customer's locale.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the current [`DateTime`].
    #[must_use]
    pub fn now(&self) -> DateTime {
        self.frozen.unwrap_or_else(DateTime::now)
    }

    /// Returns the current calendar [`Date`] in the customer's locale.
    #[must_use]
    pub fn today(&self) -> Date {
        self.now().date_at(self.offset)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system(UtcOffset::UTC)
    }
}
