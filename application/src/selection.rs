//! [`Selection`] definitions.

use booking::{
    domain::{
        add_on,
        catalog::{Hours, SizeId},
        draft::{BookingType, DateMode, PaymentMode},
        offering, CalendarMonth, TimeSlot, Weekdays,
    },
    Flow,
};
use time::{format_description::well_known::Iso8601, Date};

/// Choices of a customer applied to a [`Flow`].
#[derive(Clone, Debug, Default, clap::Args)]
pub struct Selection {
    /// ID of the preferred service.
    #[arg(long)]
    pub service: Option<offering::Id>,

    /// House size to price the cleaning by (`studio`, `2bhk`, `villa`).
    #[arg(long, conflicts_with = "hours")]
    pub size: Option<SizeId>,

    /// Number of hours to price the cleaning by.
    #[arg(long)]
    pub hours: Option<Hours>,

    /// Books a cleaning as soon as possible today.
    #[arg(long, conflicts_with_all = ["date", "dates", "weekdays", "time"])]
    pub instant: bool,

    /// Date of a single visit (`2026-11-03`).
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["dates", "weekdays"])]
    pub date: Option<Date>,

    /// Dates of multiple visits.
    #[arg(long, value_parser = parse_date, num_args = 1.., conflicts_with = "weekdays")]
    pub dates: Vec<Date>,

    /// Weekdays visits repeat on (`mon,wed,fri`).
    #[arg(long)]
    pub weekdays: Option<Weekdays>,

    /// Additional calendar months to book the weekdays in (`2026-12`).
    #[arg(long = "month", requires = "weekdays")]
    pub months: Vec<CalendarMonth>,

    /// Time of the visits (`09:30` or `9:30 AM`).
    #[arg(long)]
    pub time: Option<TimeSlot>,

    /// IDs of the add-ons to include.
    #[arg(long = "add-on")]
    pub add_ons: Vec<add_on::Id>,

    /// Pays in cash on the visit, instead of paying upfront.
    #[arg(long)]
    pub pay_later: bool,
}

impl Selection {
    /// Applies this [`Selection`] to the provided [`Flow`] in the order a
    /// customer fills the booking form.
    pub fn apply(&self, flow: &mut Flow) {
        if let Some(size) = &self.size {
            flow.select_size(size.clone());
        }
        if let Some(hours) = self.hours {
            flow.select_hours(hours);
        }

        if self.instant {
            flow.set_booking_type(BookingType::Instant);
        } else if let Some(weekdays) = self.weekdays {
            flow.set_weekdays(weekdays);
            flow.set_date_mode(DateMode::RecurringWeekdays);
            for month in &self.months {
                flow.show_month(*month);
            }
        } else if !self.dates.is_empty() {
            flow.set_date_mode(DateMode::MultiDateManual);
            for date in &self.dates {
                flow.toggle_date(*date);
            }
        } else if let Some(date) = self.date {
            flow.select_date(date);
        }
        if let Some(time) = self.time {
            flow.select_time(time);
        }

        for id in &self.add_ons {
            flow.toggle_add_on(*id);
        }
        if self.pay_later {
            flow.set_payment_mode(PaymentMode::PayLater);
        }
    }
}

/// Parses an ISO 8601 calendar [`Date`].
fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &Iso8601::DATE)
}
