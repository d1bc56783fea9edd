//! [`Schedule`] of multiple visits.

use std::collections::BTreeSet;

use time::Date;
use tracing as log;

use super::calendar::{self, CalendarMonth, Weekdays};

/// Multi-date selection of a recurring or manually picked cleaning.
///
/// Selected dates are composed of three sets:
/// - dates produced by the weekday rule in every month shown so far;
/// - dates picked manually, surviving any rule change or month navigation;
/// - dates deselected manually, always subtracted from the rule's output, so
///   a deselection sticks until the same date is picked again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    /// [`Weekdays`] rule populating the shown months.
    rule: Weekdays,

    /// [`CalendarMonth`] currently shown.
    month: CalendarMonth,

    /// Every [`CalendarMonth`] shown so far.
    shown: BTreeSet<CalendarMonth>,

    /// Dates produced by the `rule`.
    expanded: BTreeSet<Date>,

    /// Dates picked manually.
    picked: BTreeSet<Date>,

    /// Dates of the `rule` deselected manually.
    excluded: BTreeSet<Date>,
}

impl Schedule {
    /// Creates a new empty [`Schedule`] showing the provided `month`.
    #[must_use]
    pub fn new(month: CalendarMonth) -> Self {
        Self {
            rule: Weekdays::NONE,
            month,
            shown: BTreeSet::from([month]),
            expanded: BTreeSet::new(),
            picked: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Returns the currently shown [`CalendarMonth`].
    #[must_use]
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    /// Iterates over the selected dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        let mut ruled =
            self.expanded.difference(&self.excluded).copied().peekable();
        let mut picked = self.picked.iter().copied().peekable();
        std::iter::from_fn(move || match (ruled.peek().copied(), picked.peek().copied()) {
            (Some(r), Some(p)) if r == p => {
                _ = picked.next();
                ruled.next()
            }
            (Some(r), Some(p)) if r < p => ruled.next(),
            (Some(_) | None, Some(_)) => picked.next(),
            (Some(_), None) => ruled.next(),
            (None, None) => None,
        })
    }

    /// Returns the number of selected dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates().count()
    }

    /// Indicates whether no date is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates().next().is_none()
    }

    /// Indicates whether the provided `date` is selected.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.picked.contains(&date)
            || (self.expanded.contains(&date) && !self.excluded.contains(&date))
    }

    /// Replaces the [`Weekdays`] rule, recomputing its dates in every month
    /// shown so far, not earlier than `min`.
    ///
    /// Manual picks and deselections are kept as is.
    pub fn set_rule(&mut self, rule: Weekdays, min: Date) {
        self.rule = rule;
        self.expanded.clear();
        for month in self.shown.clone() {
            self.expand(month, min);
        }
    }

    /// Shows the provided `month`, merging the rule's dates of it into the
    /// selection.
    ///
    /// Showing an already shown month changes nothing.
    pub fn show(&mut self, month: CalendarMonth, min: Date) {
        self.month = month;
        if self.shown.insert(month) {
            self.expand(month, min);
        }
    }

    /// Toggles the provided `date` in the selection.
    ///
    /// Dates earlier than `min` are not selectable and are ignored, in which
    /// case `false` is returned.
    pub fn toggle(&mut self, date: Date, min: Date) -> bool {
        if date < min {
            log::debug!("ignoring toggle of past date {date}");
            return false;
        }

        if self.contains(date) {
            _ = self.picked.remove(&date);
            if self.expanded.contains(&date) {
                _ = self.excluded.insert(date);
            }
        } else {
            _ = self.excluded.remove(&date);
            if !self.expanded.contains(&date) {
                _ = self.picked.insert(date);
            }
        }
        true
    }

    /// Clears every selected date along with the [`Weekdays`] rule and the
    /// months shown before the current one.
    pub fn clear(&mut self) {
        self.rule = Weekdays::NONE;
        self.shown = BTreeSet::from([self.month]);
        self.expanded.clear();
        self.picked.clear();
        self.excluded.clear();
    }

    /// Merges the rule's dates of the provided `month` into the selection.
    fn expand(&mut self, month: CalendarMonth, min: Date) {
        self.expanded
            .extend(calendar::expand(self.rule, month.window(), min));
    }
}

#[cfg(test)]
mod spec {
    use time::{Date, Month, Weekday};

    use crate::domain::calendar::{CalendarMonth, Weekdays};

    use super::Schedule;

    fn nov(day: u8) -> Date {
        Date::from_calendar_date(2026, Month::November, day).unwrap()
    }

    fn dec(day: u8) -> Date {
        Date::from_calendar_date(2026, Month::December, day).unwrap()
    }

    fn november() -> CalendarMonth {
        CalendarMonth::new(2026, Month::November).unwrap()
    }

    fn mwf() -> Weekdays {
        Weekdays::of([Weekday::Monday, Weekday::Wednesday, Weekday::Friday])
    }

    fn days(schedule: &Schedule) -> Vec<u8> {
        schedule.dates().map(|d| d.day()).collect()
    }

    #[test]
    fn rule_populates_shown_month() {
        let mut schedule = Schedule::new(november());

        schedule.set_rule(mwf(), nov(1));

        assert_eq!(schedule.len(), 13);
        assert_eq!(days(&schedule)[..3], [2, 4, 6]);
    }

    #[test]
    fn rule_respects_min_date() {
        let mut schedule = Schedule::new(november());

        schedule.set_rule(mwf(), nov(20));

        assert_eq!(days(&schedule), [20, 23, 25, 27, 30]);
    }

    #[test]
    fn empty_rule_selects_nothing() {
        let mut schedule = Schedule::new(november());

        schedule.set_rule(Weekdays::NONE, nov(1));

        assert!(schedule.is_empty());
    }

    #[test]
    fn month_navigation_merges_and_keeps_other_months() {
        let mut schedule = Schedule::new(november());
        schedule.set_rule(mwf(), nov(1));
        assert!(schedule.toggle(dec(25), nov(1)));

        let december = november().next().unwrap();
        schedule.show(december, nov(1));

        assert_eq!(schedule.month(), december);
        assert!(schedule.contains(nov(2)));
        assert!(schedule.contains(dec(2)));
        assert!(schedule.contains(dec(25)));
        // 13 dates in both months, with the picked Friday produced by the rule
        // as well.
        assert_eq!(schedule.len(), 26);
    }

    #[test]
    fn showing_same_month_again_is_idempotent() {
        let mut schedule = Schedule::new(november());
        schedule.set_rule(mwf(), nov(1));
        let _ = schedule.toggle(nov(4), nov(1));
        let before = schedule.clone();

        schedule.show(november(), nov(1));
        schedule.show(november(), nov(1));

        assert_eq!(schedule.dates().collect::<Vec<_>>(), before.dates().collect::<Vec<_>>());
        assert!(!schedule.contains(nov(4)));
    }

    #[test]
    fn deselection_sticks_across_rule_changes_and_navigation() {
        let mut schedule = Schedule::new(november());
        schedule.set_rule(mwf(), nov(1));

        assert!(schedule.toggle(nov(4), nov(1)));
        assert!(!schedule.contains(nov(4)));

        schedule.set_rule(Weekdays::ALL, nov(1));
        assert!(!schedule.contains(nov(4)));
        assert_eq!(schedule.len(), 29);

        schedule.show(november().next().unwrap(), nov(1));
        schedule.show(november(), nov(1));
        assert!(!schedule.contains(nov(4)));

        assert!(schedule.toggle(nov(4), nov(1)));
        assert!(schedule.contains(nov(4)));
    }

    #[test]
    fn manual_picks_survive_rule_changes() {
        let mut schedule = Schedule::new(november());
        schedule.set_rule(mwf(), nov(1));
        assert!(schedule.toggle(nov(3), nov(1)));

        schedule.set_rule(Weekdays::NONE, nov(1));

        assert_eq!(days(&schedule), [3]);
    }

    #[test]
    fn past_dates_are_ignored() {
        let mut schedule = Schedule::new(november());

        assert!(!schedule.toggle(nov(5), nov(10)));
        assert!(schedule.is_empty());
    }

    #[test]
    fn dates_are_sorted_and_unique() {
        let mut schedule = Schedule::new(november());
        let _ = schedule.toggle(nov(30), nov(1));
        let _ = schedule.toggle(nov(3), nov(1));
        schedule.set_rule(mwf(), nov(1));
        let _ = schedule.toggle(nov(9), nov(1));
        let _ = schedule.toggle(nov(9), nov(1));

        let dates = schedule.dates().collect::<Vec<_>>();

        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates.len(), schedule.len());
        assert_eq!(dates.len(), 14);
    }

    #[test]
    fn clear_drops_everything() {
        let mut schedule = Schedule::new(november());
        schedule.set_rule(mwf(), nov(1));
        let _ = schedule.toggle(nov(3), nov(1));
        let _ = schedule.toggle(nov(4), nov(1));

        schedule.clear();

        assert!(schedule.is_empty());

        schedule.show(november().next().unwrap(), nov(1));
        assert!(schedule.is_empty());
    }

    #[test]
    fn rule_after_clear_fills_current_month_only() {
        let mut schedule = Schedule::new(november());
        schedule.show(november().next().unwrap(), nov(1));

        schedule.clear();
        schedule.set_rule(mwf(), nov(1));

        assert_eq!(schedule.len(), 13);
        assert!(schedule.dates().all(|d| d.month() == Month::December));
        assert_eq!(schedule.dates().next(), Some(dec(2)));
    }
}
