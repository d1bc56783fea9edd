//! Short summaries of a [`Draft`] shown in place of collapsed sections.

use time::Date;

use crate::domain::{
    draft::{BookingType, DurationSelection},
    Draft, Section, Weekdays,
};

use super::display_price;

/// Returns the summary of the provided [`Section`] of a [`Draft`], or an
/// empty string if there is nothing to summarize yet.
#[must_use]
pub fn section(draft: &Draft, section: Section) -> String {
    match section {
        Section::Size => size(draft),
        Section::Datetime => datetime(draft),
    }
}

/// Returns the one-line summary of a whole [`Draft`] (`2 BHK • Nov 3 •
/// 9:00 AM`).
#[must_use]
pub fn booking(draft: &Draft) -> String {
    let mut parts = vec![];
    if let Some(label) = duration_label(draft) {
        parts.push(label);
    }
    match draft.visit_count() {
        0 | 1 => {
            if let Some(date) = draft.final_dates().first() {
                parts.push(short_date(*date));
            }
        }
        n => parts.push(format!("{n} visits")),
    }
    if let Some(time) = draft.selected_time() {
        parts.push(time.to_string());
    }
    parts.join(" • ")
}

/// Returns the label of the chosen recurring [`Weekdays`].
#[must_use]
pub fn weekdays(days: Weekdays) -> String {
    match days.len() {
        0 => "None selected".to_owned(),
        1 => "1 day".to_owned(),
        7 => "All days".to_owned(),
        n => format!("{n} days"),
    }
}

/// Summarizes the chosen house size or hours with the price.
fn size(draft: &Draft) -> String {
    duration_label(draft)
        .map(|label| format!("{label} • {}", display_price(draft.base_price())))
        .unwrap_or_default()
}

/// Summarizes the chosen dates and time.
fn datetime(draft: &Draft) -> String {
    if draft.booking_type() == BookingType::Instant {
        return "Instant booking (ASAP)".to_owned();
    }
    match (draft.final_dates().as_slice(), draft.selected_time()) {
        ([date], Some(time)) => format!("{} at {time}", short_date(*date)),
        ([], _) | ([_], None) => String::new(),
        (dates, _) => format!("{} visits scheduled", dates.len()),
    }
}

/// Returns the label of the chosen house size or hours, if any.
fn duration_label(draft: &Draft) -> Option<String> {
    match draft.duration_selection() {
        DurationSelection::Size(id) => id
            .as_ref()
            .and_then(|id| draft.catalog().size(id.as_str()))
            .map(|tier| tier.label.to_owned()),
        DurationSelection::Hours(hours) => Some(hours.label()),
    }
}

/// Formats the provided [`Date`] as `Nov 3`.
fn short_date(date: Date) -> String {
    let month = date.month().to_string();
    format!("{} {}", month.get(..3).unwrap_or(&month), date.day())
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::DateTime;
    use rust_decimal::Decimal;
    use time::{Date, Month, UtcOffset, Weekday};

    use crate::domain::{
        draft::{BookingType, DateMode, PricingMode},
        Catalog, Clock, Draft, Section, ServiceOffer, TimeSlot, Weekdays,
    };

    use super::{booking, section, weekdays};

    fn draft() -> Draft {
        let now = DateTime::from_rfc3339("2026-11-01T04:00:00Z").unwrap();
        let clock = Clock::frozen(now, UtcOffset::from_hms(4, 0, 0).unwrap());
        Draft::new(Arc::new(Catalog::default()), clock)
    }

    fn date(day: u8) -> Date {
        Date::from_calendar_date(2026, Month::November, day).unwrap()
    }

    #[test]
    fn summarizes_size_with_price() {
        let mut d = draft();
        assert_eq!(section(&d, Section::Size), "");

        d.select_size("2bhk".parse().unwrap());
        assert_eq!(section(&d, Section::Size), "2 BHK • AED 300");

        d.select_service(&ServiceOffer {
            id: 1.into(),
            name: "Deep Cleaning".to_owned(),
            base_price: Decimal::ZERO,
        });
        assert_eq!(section(&d, Section::Size), "2 BHK • AED 600");
    }

    #[test]
    fn summarizes_hours_with_price() {
        let mut d = draft();
        d.set_pricing_mode(PricingMode::ByHours);

        assert_eq!(section(&d, Section::Size), "2 Hours • AED 150");
    }

    #[test]
    fn summarizes_datetime() {
        let mut d = draft();
        assert_eq!(section(&d, Section::Datetime), "");

        d.select_date(date(3));
        assert_eq!(section(&d, Section::Datetime), "");

        d.select_time(TimeSlot::at(9, 30).unwrap());
        assert_eq!(section(&d, Section::Datetime), "Nov 3 at 9:30 AM");

        d.set_weekdays(Weekdays::of([Weekday::Friday]));
        d.set_date_mode(DateMode::RecurringWeekdays);
        assert_eq!(section(&d, Section::Datetime), "4 visits scheduled");

        d.set_booking_type(BookingType::Instant);
        assert_eq!(section(&d, Section::Datetime), "Instant booking (ASAP)");
    }

    #[test]
    fn joins_booking_parts() {
        let mut d = draft();
        assert_eq!(booking(&d), "");

        d.select_size("studio".parse().unwrap());
        d.select_date(date(12));
        d.select_time(TimeSlot::at(17, 0).unwrap());

        assert_eq!(booking(&d), "Studio • Nov 12 • 5:00 PM");
    }

    #[test]
    fn labels_weekdays() {
        assert_eq!(weekdays(Weekdays::NONE), "None selected");
        assert_eq!(weekdays(Weekdays::of([Weekday::Monday])), "1 day");
        assert_eq!(weekdays(Weekdays::WORKDAYS), "5 days");
        assert_eq!(weekdays(Weekdays::ALL), "All days");
    }
}
