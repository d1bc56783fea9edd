//! [`TimeSlot`] definitions.

use std::{fmt, str::FromStr, sync::LazyLock};

use common::define_kind;
use regex::Regex;
use time::Time;

/// Time of day a cleaning starts at.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeSlot {
    /// As soon as possible, for instant bookings.
    Asap,

    /// Exact wall-clock [`Time`] in the customer's locale.
    At(Time),
}

impl TimeSlot {
    /// Sentinel text of the [`TimeSlot::Asap`].
    pub const ASAP: &'static str = "ASAP";

    /// Creates a new [`TimeSlot::At`] the provided `hour` and `minute`.
    ///
    /// [`None`] is returned if the components are out of range.
    #[must_use]
    pub fn at(hour: u8, minute: u8) -> Option<Self> {
        Time::from_hms(hour, minute, 0).ok().map(Self::At)
    }

    /// Returns the wall-clock [`Time`] of this [`TimeSlot`], if it's an
    /// exact one.
    #[must_use]
    pub fn time(self) -> Option<Time> {
        match self {
            Self::Asap => None,
            Self::At(t) => Some(t),
        }
    }

    /// Indicates whether this [`TimeSlot`] is the [`TimeSlot::Asap`] one.
    #[must_use]
    pub fn is_asap(self) -> bool {
        matches!(self, Self::Asap)
    }

    /// Returns the [`Period`] this [`TimeSlot`] falls into, if any.
    #[must_use]
    pub fn period(self) -> Option<Period> {
        self.time().and_then(Period::of)
    }
}

impl fmt::Display for TimeSlot {
    /// Formats an exact [`TimeSlot`] in the 12-hour `h:MM AM` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = match self {
            Self::Asap => return f.write_str(Self::ASAP),
            Self::At(t) => t,
        };
        let (hour, minute) = (time.hour(), time.minute());
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{hour}:{minute:02} {meridiem}")
    }
}

impl FromStr for TimeSlot {
    type Err = &'static str;

    /// Parses either the `ASAP` sentinel, a 24-hour `HH:MM` time or a 12-hour
    /// `h:MM AM/PM` time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        /// Regular expression matching both 12-hour and 24-hour times:
        /// - Hours of one or two digits;
        /// - Minutes of exactly two digits;
        /// - Optional case-insensitive `AM`/`PM` suffix.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\d{1,2}):(\d{2})(?:\s*([AaPp])[Mm])?$")
                .expect("valid regex")
        });

        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::ASAP) {
            return Ok(Self::Asap);
        }

        let caps = REGEX.captures(s).ok_or("invalid `TimeSlot` format")?;
        let hour = caps[1].parse::<u8>().map_err(|_| "invalid hour")?;
        let minute = caps[2].parse::<u8>().map_err(|_| "invalid minute")?;
        let hour = match caps.get(3).map(|m| m.as_str()) {
            None => hour,
            Some(_) if !(1..=12).contains(&hour) => {
                return Err("12-hour time must have hour in 1..=12");
            }
            Some("a" | "A") => hour % 12,
            Some(_) => hour % 12 + 12,
        };

        Self::at(hour, minute).ok_or("time out of range")
    }
}

define_kind! {
    #[doc = "Period of a day grouping bookable [`TimeSlot`]s."]
    enum Period {
        #[doc = "06:00 through 11:00."]
        Morning = 1,

        #[doc = "12:00 through 16:00."]
        Afternoon = 2,

        #[doc = "17:00 through 20:00."]
        Evening = 3,
    }
}

impl Period {
    /// Returns the inclusive range of starting hours of this [`Period`].
    #[must_use]
    pub const fn hours(self) -> (u8, u8) {
        match self {
            Self::Morning => (6, 11),
            Self::Afternoon => (12, 16),
            Self::Evening => (17, 20),
        }
    }

    /// Returns the human-readable label of this [`Period`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    /// Returns the hourly bookable [`TimeSlot`]s of this [`Period`].
    #[must_use]
    pub fn slots(self) -> Vec<TimeSlot> {
        let (first, last) = self.hours();
        (first..=last).filter_map(|h| TimeSlot::at(h, 0)).collect()
    }

    /// Classifies the provided `time` into a [`Period`], if it's bookable.
    #[must_use]
    pub fn of(time: Time) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| {
            let (first, last) = p.hours();
            (first..=last).contains(&time.hour())
        })
    }
}

#[cfg(test)]
mod spec {
    use time::Time;

    use super::{Period, TimeSlot};

    fn at(hour: u8, minute: u8) -> TimeSlot {
        TimeSlot::at(hour, minute).unwrap()
    }

    #[test]
    fn parses_24_hour_times() {
        assert_eq!("09:30".parse(), Ok(at(9, 30)));
        assert_eq!("9:30".parse(), Ok(at(9, 30)));
        assert_eq!("00:00".parse(), Ok(at(0, 0)));
        assert_eq!("23:59".parse(), Ok(at(23, 59)));
        assert!("24:00".parse::<TimeSlot>().is_err());
        assert!("12:60".parse::<TimeSlot>().is_err());
        assert!("9.30".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn parses_12_hour_times() {
        assert_eq!("9:30 AM".parse(), Ok(at(9, 30)));
        assert_eq!("09:30 pm".parse(), Ok(at(21, 30)));
        assert_eq!("12:00 AM".parse(), Ok(at(0, 0)));
        assert_eq!("12:15 PM".parse(), Ok(at(12, 15)));
        assert_eq!("5:00PM".parse(), Ok(at(17, 0)));
        assert!("13:00 PM".parse::<TimeSlot>().is_err());
        assert!("0:30 AM".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn parses_asap_sentinel() {
        assert_eq!("ASAP".parse(), Ok(TimeSlot::Asap));
        assert_eq!("asap".parse(), Ok(TimeSlot::Asap));
        assert!(TimeSlot::Asap.is_asap());
        assert_eq!(TimeSlot::Asap.time(), None);
    }

    #[test]
    fn displays_in_12_hour_form() {
        assert_eq!(at(6, 0).to_string(), "6:00 AM");
        assert_eq!(at(0, 5).to_string(), "12:05 AM");
        assert_eq!(at(12, 0).to_string(), "12:00 PM");
        assert_eq!(at(20, 30).to_string(), "8:30 PM");
        assert_eq!(TimeSlot::Asap.to_string(), "ASAP");
    }

    #[test]
    fn display_is_parseable_back() {
        for h in 0..24 {
            let slot = at(h, 45);
            assert_eq!(slot.to_string().parse(), Ok(slot), "{slot}");
        }
    }

    #[test]
    fn periods_have_hourly_slots() {
        assert_eq!(Period::Morning.slots().len(), 6);
        assert_eq!(Period::Afternoon.slots().len(), 5);
        assert_eq!(Period::Evening.slots().len(), 4);
        assert_eq!(Period::Morning.slots().first(), Some(&at(6, 0)));
        assert_eq!(Period::Evening.slots().last(), Some(&at(20, 0)));
    }

    #[test]
    fn classifies_times_into_periods() {
        let time = |h| Time::from_hms(h, 0, 0).unwrap();

        assert_eq!(Period::of(time(6)), Some(Period::Morning));
        assert_eq!(Period::of(time(11)), Some(Period::Morning));
        assert_eq!(Period::of(time(12)), Some(Period::Afternoon));
        assert_eq!(Period::of(time(17)), Some(Period::Evening));
        assert_eq!(Period::of(time(21)), None);
        assert_eq!(Period::of(time(5)), None);
        assert_eq!(at(14, 30).period(), Some(Period::Afternoon));
        assert_eq!(TimeSlot::Asap.period(), None);
    }
}
