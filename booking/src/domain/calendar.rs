//! Calendar definitions and the recurring dates expansion.

use std::{fmt, str::FromStr};

use time::{Date, Month, Weekday};

/// Set of [`Weekday`]s a recurring cleaning repeats on.
///
/// Indexed the way calendars display weeks: `0` is Sunday, `6` is Saturday.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Weekdays(u8);

impl Weekdays {
    /// Empty [`Weekdays`] set.
    pub const NONE: Self = Self(0);

    /// Monday through Friday.
    pub const WORKDAYS: Self = Self(0b011_1110);

    /// Every day of a week.
    pub const ALL: Self = Self(0b111_1111);

    /// Creates new [`Weekdays`] out of the provided [`Weekday`]s.
    #[must_use]
    pub fn of(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::NONE, Self::with)
    }

    /// Creates new [`Weekdays`] out of the provided Sunday-based indices.
    ///
    /// [`None`] is returned if any index is out of the `0..=6` range.
    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = u8>) -> Option<Self> {
        indices.into_iter().try_fold(Self::NONE, |set, i| {
            (i < 7).then_some(Self(set.0 | (1 << i)))
        })
    }

    /// Returns these [`Weekdays`] with the provided `day` added.
    #[must_use]
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | Self::bit(day))
    }

    /// Returns these [`Weekdays`] with the provided `day` toggled.
    #[must_use]
    pub fn toggled(self, day: Weekday) -> Self {
        Self(self.0 ^ Self::bit(day))
    }

    /// Indicates whether the provided `day` is in these [`Weekdays`].
    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Indicates whether the provided `date` falls on one of these
    /// [`Weekdays`].
    #[must_use]
    pub fn matches(self, date: Date) -> bool {
        self.contains(date.weekday())
    }

    /// Indicates whether these [`Weekdays`] are empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of days in these [`Weekdays`].
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over these [`Weekdays`] starting from Sunday.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        let mut day = Weekday::Sunday;
        (0..7).filter_map(move |_| {
            let current = day;
            day = day.next();
            self.contains(current).then_some(current)
        })
    }

    /// Returns the Sunday-based indices of these [`Weekdays`].
    pub fn indices(self) -> impl Iterator<Item = u8> {
        self.iter().map(Weekday::number_days_from_sunday)
    }

    /// Returns the bit of the provided `day`.
    fn bit(day: Weekday) -> u8 {
        1 << day.number_days_from_sunday()
    }
}

impl fmt::Debug for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&day.to_string()[..3])?;
        }
        Ok(())
    }
}

impl FromStr for Weekdays {
    type Err = &'static str;

    /// Parses comma-separated weekday names (`mon,wed,fri`), abbreviated to
    /// at least three letters, or Sunday-based indices (`1,3,5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(Self::NONE, |set, part| {
                if let Ok(i) = part.parse::<u8>() {
                    return Self::from_indices([i])
                        .map(|d| Self(set.0 | d.0))
                        .ok_or("weekday index out of range");
                }
                let part = part.to_lowercase();
                let mut day = Weekday::Sunday;
                for _ in 0..7 {
                    let name = day.to_string().to_lowercase();
                    if part.len() >= 3 && name.starts_with(&part) {
                        return Ok(set.with(day));
                    }
                    day = day.next();
                }
                Err("unknown weekday")
            })
    }
}

/// Calendar month a calendar view displays.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarMonth {
    /// Year of this [`CalendarMonth`].
    year: i32,

    /// [`Month`] of the `year`.
    month: Month,
}

impl CalendarMonth {
    /// Creates a new [`CalendarMonth`].
    ///
    /// [`None`] is returned if the `year` is out of the supported range.
    #[must_use]
    pub fn new(year: i32, month: Month) -> Option<Self> {
        Date::from_calendar_date(year, month, 1)
            .ok()
            .map(|_| Self { year, month })
    }

    /// Returns the [`CalendarMonth`] containing the provided `date`.
    #[must_use]
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year of this [`CalendarMonth`].
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the [`Month`] of this [`CalendarMonth`].
    #[must_use]
    pub fn month(self) -> Month {
        self.month
    }

    /// Returns the first day of this [`CalendarMonth`].
    #[expect(clippy::missing_panics_doc, reason = "checked on creation")]
    #[must_use]
    pub fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("checked on creation")
    }

    /// Returns the last day of this [`CalendarMonth`].
    #[must_use]
    pub fn last_day(self) -> Date {
        let mut day = self.first_day();
        while let Some(next) = day.next_day().filter(|d| d.month() == self.month)
        {
            day = next;
        }
        day
    }

    /// Returns the [`DateRange`] covering this [`CalendarMonth`].
    #[must_use]
    pub fn window(self) -> DateRange {
        DateRange {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    /// Indicates whether the provided `date` is in this [`CalendarMonth`].
    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the [`CalendarMonth`] following this one.
    ///
    /// [`None`] is returned at the end of the supported range.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.last_day().next_day().map(Self::containing)
    }

    /// Returns the [`CalendarMonth`] preceding this one.
    ///
    /// [`None`] is returned at the start of the supported range.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.first_day().previous_day().map(Self::containing)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for CalendarMonth {
    type Err = &'static str;

    /// Parses a `YYYY-MM` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or("expected `YYYY-MM`")?;
        let year = year.parse().map_err(|_| "invalid year")?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or("invalid month")?;
        Self::new(year, month).ok_or("year out of range")
    }
}

/// Inclusive range of calendar [`Date`]s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    /// First [`Date`] of this [`DateRange`].
    pub start: Date,

    /// Last [`Date`] of this [`DateRange`].
    pub end: Date,
}

impl DateRange {
    /// Indicates whether the provided `date` is in this [`DateRange`].
    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Iterates over every [`Date`] of this [`DateRange`] in ascending order.
    pub fn days(self) -> impl Iterator<Item = Date> {
        std::iter::successors(
            Some(self.start).filter(|d| *d <= self.end),
            move |d| d.next_day().filter(|next| *next <= self.end),
        )
    }
}

/// Expands the provided `weekdays` into concrete [`Date`]s of the `window`.
///
/// Returns every date of the `window` falling on one of the `weekdays` and not
/// earlier than `min`, in ascending order. Empty `weekdays` mean no recurring
/// schedule at all, so nothing is returned.
#[must_use]
pub fn expand(weekdays: Weekdays, window: DateRange, min: Date) -> Vec<Date> {
    if weekdays.is_empty() {
        return Vec::new();
    }
    window
        .days()
        .filter(|d| *d >= min && weekdays.matches(*d))
        .collect()
}

#[cfg(test)]
mod spec {
    use time::{Date, Month, Weekday};

    use super::{expand, CalendarMonth, DateRange, Weekdays};

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    fn month(year: i32, month: Month) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn weekdays_set_operations() {
        let set = Weekdays::of([Weekday::Monday, Weekday::Wednesday]);

        assert!(set.contains(Weekday::Monday));
        assert!(!set.contains(Weekday::Sunday));
        assert_eq!(set.len(), 2);
        assert_eq!(set.indices().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(
            set.toggled(Weekday::Monday),
            Weekdays::of([Weekday::Wednesday]),
        );
        assert_eq!(set.with(Weekday::Friday).len(), 3);
        assert_eq!(Weekdays::WORKDAYS.indices().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(Weekdays::ALL.len(), 7);
        assert!(Weekdays::NONE.is_empty());
    }

    #[test]
    fn weekdays_from_indices() {
        assert_eq!(
            Weekdays::from_indices([0, 6]),
            Some(Weekdays::of([Weekday::Sunday, Weekday::Saturday])),
        );
        assert_eq!(Weekdays::from_indices([7]), None);
        assert_eq!(Weekdays::from_indices([]), Some(Weekdays::NONE));
    }

    #[test]
    fn weekdays_parse_and_display() {
        let mwf: Weekdays = "mon, Wed,friday".parse().unwrap();

        assert_eq!(
            mwf,
            Weekdays::of([Weekday::Monday, Weekday::Wednesday, Weekday::Friday]),
        );
        assert_eq!(mwf.to_string(), "Mon,Wed,Fri");
        assert_eq!("1,3,5".parse::<Weekdays>(), Ok(mwf));
        assert!("mo".parse::<Weekdays>().is_err());
        assert!("funday".parse::<Weekdays>().is_err());
        assert!("9".parse::<Weekdays>().is_err());
    }

    #[test]
    fn month_window_bounds() {
        let feb = month(2028, Month::February);

        assert_eq!(feb.first_day(), date(2028, Month::February, 1));
        assert_eq!(feb.last_day(), date(2028, Month::February, 29));
        assert_eq!(month(2026, Month::November).last_day().day(), 30);
        assert_eq!(month(2026, Month::December).last_day().day(), 31);
    }

    #[test]
    fn month_navigation() {
        let dec = month(2026, Month::December);

        assert_eq!(dec.next(), Some(month(2027, Month::January)));
        assert_eq!(dec.previous(), Some(month(2026, Month::November)));
        assert_eq!(month(2027, Month::January).previous(), Some(dec));
        assert!(dec.contains(date(2026, Month::December, 31)));
        assert!(!dec.contains(date(2027, Month::December, 1)));
    }

    #[test]
    fn month_parse_and_display() {
        assert_eq!("2026-11".parse(), Ok(month(2026, Month::November)));
        assert_eq!(month(2026, Month::March).to_string(), "2026-03");
        assert!("2026-13".parse::<CalendarMonth>().is_err());
        assert!("november".parse::<CalendarMonth>().is_err());
    }

    #[test]
    fn range_days_are_inclusive() {
        let range = DateRange {
            start: date(2026, Month::October, 30),
            end: date(2026, Month::November, 2),
        };

        assert_eq!(range.days().count(), 4);
        assert!(range.contains(date(2026, Month::November, 2)));
        assert!(!range.contains(date(2026, Month::November, 3)));

        let empty = DateRange {
            start: range.end,
            end: range.start,
        };
        assert_eq!(empty.days().count(), 0);
    }

    #[test]
    fn expands_mon_wed_fri_of_a_sunday_started_30_day_month() {
        // November 2026 starts on a Sunday and has 30 days.
        let november = month(2026, Month::November);
        assert_eq!(november.first_day().weekday(), Weekday::Sunday);

        let mwf = Weekdays::of([
            Weekday::Monday,
            Weekday::Wednesday,
            Weekday::Friday,
        ]);
        let dates = expand(mwf, november.window(), november.first_day());

        let days = dates.iter().map(|d| d.day()).collect::<Vec<_>>();
        assert_eq!(days, [2, 4, 6, 9, 11, 13, 16, 18, 20, 23, 25, 27, 30]);
    }

    #[test]
    fn expansion_respects_min_date() {
        let november = month(2026, Month::November);
        let min = date(2026, Month::November, 18);

        let dates = expand(Weekdays::ALL, november.window(), min);

        assert_eq!(dates.first(), Some(&min));
        assert_eq!(dates.len(), 13);
        assert!(dates.iter().all(|d| *d >= min));
    }

    #[test]
    fn expansion_of_no_weekdays_is_empty() {
        for m in [Month::January, Month::February, Month::November] {
            let window = month(2026, m).window();
            assert!(expand(Weekdays::NONE, window, window.start).is_empty());
        }
    }

    #[test]
    fn expansion_is_sorted_unique_and_on_weekdays() {
        let window = DateRange {
            start: date(2026, Month::October, 1),
            end: date(2026, Month::December, 31),
        };
        let min = date(2026, Month::October, 17);

        for bits in 0..=0b111_1111_u8 {
            let weekdays = Weekdays::from_indices(
                (0..7).filter(|i| bits & (1 << i) != 0),
            )
            .unwrap();

            let dates = expand(weekdays, window, min);

            assert!(dates.windows(2).all(|w| w[0] < w[1]), "{weekdays:?}");
            assert!(dates.iter().all(|d| *d >= min && weekdays.matches(*d)));
            assert!(dates.iter().all(|d| window.contains(*d)));
        }
    }
}
