//! [`Draft`] of a booking.

use std::{collections::BTreeSet, sync::Arc};

use common::{define_kind, Money};
use time::{Date, Weekday};
use tracing as log;

use super::{
    add_on,
    address,
    calendar::{CalendarMonth, Weekdays},
    catalog::{Catalog, Hours, Minutes, Multiplier, SizeId},
    clock::Clock,
    offering::{self, ServiceOffer},
    schedule::Schedule,
    time_slot::TimeSlot,
};

define_kind! {
    #[doc = "Type of a booking."]
    enum BookingType {
        #[doc = "Cleaning as soon as possible."]
        Instant = 1,

        #[doc = "Cleaning at a chosen date and time."]
        Scheduled = 2,
    }
}

define_kind! {
    #[doc = "Basis a booking price is computed on."]
    enum PricingMode {
        #[doc = "Priced by a house size tier."]
        BySize = 1,

        #[doc = "Priced by a number of hours."]
        ByHours = 2,
    }
}

define_kind! {
    #[doc = "Way the dates of a scheduled booking are chosen."]
    enum DateMode {
        #[doc = "Single visit on a chosen date."]
        SingleDate = 1,

        #[doc = "Visits on the chosen weekdays of every shown month."]
        RecurringWeekdays = 2,

        #[doc = "Visits on manually picked dates."]
        MultiDateManual = 3,
    }
}

define_kind! {
    #[doc = "Moment a booking is paid at."]
    enum PaymentMode {
        #[doc = "Paid upfront by card."]
        PayNow = 1,

        #[doc = "Paid in cash on the visit."]
        PayLater = 2,
    }
}

define_kind! {
    #[doc = "Field of a [`Draft`] required for a booking."]
    enum Field {
        #[doc = "House size."]
        Size = 1,

        #[doc = "Number of hours."]
        Duration = 2,

        #[doc = "Date of a visit."]
        Date = 3,

        #[doc = "Time of a visit."]
        Time = 4,

        #[doc = "Service type."]
        Service = 5,

        #[doc = "Address of a visit."]
        Address = 6,
    }
}

impl Field {
    /// Returns the human-readable description of this [`Field`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Size => "a house size",
            Self::Duration => "at least 2 hours",
            Self::Date => "a date",
            Self::Time => "a time",
            Self::Service => "a service",
            Self::Address => "an address",
        }
    }
}

/// Duration a booking is priced by.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DurationSelection {
    /// House size tier, if chosen.
    Size(Option<SizeId>),

    /// Number of hours.
    Hours(Hours),
}

impl DurationSelection {
    /// Returns the [`PricingMode`] of this [`DurationSelection`].
    #[must_use]
    pub fn mode(&self) -> PricingMode {
        match self {
            Self::Size(_) => PricingMode::BySize,
            Self::Hours(_) => PricingMode::ByHours,
        }
    }
}

/// Service chosen for a booking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceChoice {
    /// ID of the chosen [`ServiceOffer`].
    pub id: offering::Id,

    /// Name of the chosen [`ServiceOffer`].
    pub name: String,
}

impl From<&ServiceOffer> for ServiceChoice {
    fn from(offer: &ServiceOffer) -> Self {
        Self {
            id: offer.id,
            name: offer.name.clone(),
        }
    }
}

/// Validity of every [`Field`] of a [`Draft`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::struct_excessive_bools, reason = "one flag per field")]
pub struct Validity {
    /// House size is chosen, or not required.
    pub size: bool,

    /// Number of hours is enough, or not required.
    pub duration: bool,

    /// Some date is chosen, or not required.
    pub date: bool,

    /// Time is chosen, or not required.
    pub time: bool,

    /// Service is chosen.
    pub service: bool,

    /// Address is chosen.
    pub address: bool,
}

impl Validity {
    /// Indicates whether every [`Field`] is valid.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.first_unmet().is_none()
    }

    /// Returns the first invalid [`Field`], if any.
    #[must_use]
    pub fn first_unmet(self) -> Option<Field> {
        [
            (Field::Size, self.size),
            (Field::Duration, self.duration),
            (Field::Date, self.date),
            (Field::Time, self.time),
            (Field::Service, self.service),
            (Field::Address, self.address),
        ]
        .into_iter()
        .find_map(|(field, valid)| (!valid).then_some(field))
    }
}

/// Selections of a [`Draft`].
#[derive(Clone, Debug, Eq, PartialEq)]
struct Fields {
    booking_type: BookingType,
    duration: DurationSelection,
    service: Option<ServiceChoice>,
    date_mode: DateMode,
    date: Option<Date>,
    weekdays: Weekdays,
    schedule: Schedule,
    time: Option<TimeSlot>,
    add_ons: BTreeSet<add_on::Id>,
    payment_mode: PaymentMode,
    address: Option<address::Id>,
}

impl Fields {
    /// Creates new default [`Fields`] with the calendar showing the month of
    /// `today`.
    fn new(today: Date) -> Self {
        Self {
            booking_type: BookingType::Scheduled,
            duration: DurationSelection::Size(None),
            service: None,
            date_mode: DateMode::SingleDate,
            date: None,
            weekdays: Weekdays::WORKDAYS,
            schedule: Schedule::new(CalendarMonth::containing(today)),
            time: None,
            add_ons: BTreeSet::new(),
            payment_mode: PaymentMode::PayNow,
            address: None,
        }
    }
}

/// In-progress configuration of a booking.
///
/// Every setter is infallible: incomplete or invalid selections are reported
/// through [`Draft::validity()`] only.
#[derive(Clone, Debug)]
pub struct Draft {
    /// Pricing [`Catalog`].
    catalog: Arc<Catalog>,

    /// [`Clock`] of the customer's locale.
    clock: Clock,

    /// Per-visit prices of [`add_on::AddOn`]s.
    add_on_prices: add_on::Prices,

    /// Current selections.
    fields: Fields,
}

impl Draft {
    /// Creates a new [`Draft`] with every field set to its default.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Clock) -> Self {
        Self {
            fields: Fields::new(clock.today()),
            catalog,
            clock,
            add_on_prices: add_on::Prices::default(),
        }
    }

    /// Returns the pricing [`Catalog`] of this [`Draft`].
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the [`Clock`] of this [`Draft`].
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the current [`BookingType`].
    #[must_use]
    pub fn booking_type(&self) -> BookingType {
        self.fields.booking_type
    }

    /// Returns the current [`PricingMode`].
    #[must_use]
    pub fn pricing_mode(&self) -> PricingMode {
        self.fields.duration.mode()
    }

    /// Returns the current [`DurationSelection`].
    #[must_use]
    pub fn duration_selection(&self) -> &DurationSelection {
        &self.fields.duration
    }

    /// Returns the chosen [`SizeId`], if any.
    #[must_use]
    pub fn selected_size(&self) -> Option<&SizeId> {
        match &self.fields.duration {
            DurationSelection::Size(id) => id.as_ref(),
            DurationSelection::Hours(_) => None,
        }
    }

    /// Returns the chosen [`Hours`], if priced by hours.
    #[must_use]
    pub fn selected_hours(&self) -> Option<Hours> {
        match self.fields.duration {
            DurationSelection::Size(_) => None,
            DurationSelection::Hours(h) => Some(h),
        }
    }

    /// Returns the chosen [`ServiceChoice`], if any.
    #[must_use]
    pub fn service(&self) -> Option<&ServiceChoice> {
        self.fields.service.as_ref()
    }

    /// Returns the current [`DateMode`].
    #[must_use]
    pub fn date_mode(&self) -> DateMode {
        self.fields.date_mode
    }

    /// Returns the chosen single date, if any.
    #[must_use]
    pub fn selected_date(&self) -> Option<Date> {
        self.fields.date
    }

    /// Returns the chosen multiple dates in ascending order.
    #[must_use]
    pub fn selected_dates(&self) -> Vec<Date> {
        self.fields.schedule.dates().collect()
    }

    /// Returns the chosen recurring [`Weekdays`].
    #[must_use]
    pub fn weekdays(&self) -> Weekdays {
        self.fields.weekdays
    }

    /// Returns the [`CalendarMonth`] the calendar shows.
    #[must_use]
    pub fn shown_month(&self) -> CalendarMonth {
        self.fields.schedule.month()
    }

    /// Returns the chosen [`TimeSlot`], if any.
    #[must_use]
    pub fn selected_time(&self) -> Option<TimeSlot> {
        self.fields.time
    }

    /// Returns IDs of the chosen [`add_on::AddOn`]s.
    #[must_use]
    pub fn add_ons(&self) -> &BTreeSet<add_on::Id> {
        &self.fields.add_ons
    }

    /// Returns the current [`PaymentMode`].
    #[must_use]
    pub fn payment_mode(&self) -> PaymentMode {
        self.fields.payment_mode
    }

    /// Returns ID of the chosen [`address::Address`], if any.
    #[must_use]
    pub fn address(&self) -> Option<address::Id> {
        self.fields.address
    }

    /// Sets the [`BookingType`].
    ///
    /// [`BookingType::Instant`] books today as soon as possible, while
    /// [`BookingType::Scheduled`] requires the date and time to be chosen
    /// again.
    pub fn set_booking_type(&mut self, ty: BookingType) {
        if self.fields.booking_type == ty {
            return;
        }
        let today = self.clock.today();
        let f = &mut self.fields;
        f.booking_type = ty;
        match ty {
            BookingType::Instant => {
                f.date = Some(today);
                f.time = Some(TimeSlot::Asap);
                f.schedule.clear();
            }
            BookingType::Scheduled => {
                f.date = None;
                f.time = None;
                f.schedule.clear();
                if f.date_mode == DateMode::RecurringWeekdays {
                    f.schedule.set_rule(f.weekdays, today);
                }
            }
        }
    }

    /// Sets the [`PricingMode`], replacing the selection of the other mode.
    ///
    /// [`PricingMode::ByHours`] starts with the default number of hours of
    /// the [`Catalog`].
    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        if self.pricing_mode() == mode {
            return;
        }
        self.fields.duration = match mode {
            PricingMode::BySize => DurationSelection::Size(None),
            PricingMode::ByHours => {
                DurationSelection::Hours(self.catalog.default_hours())
            }
        };
    }

    /// Chooses a house size tier, switching to [`PricingMode::BySize`].
    ///
    /// Sizes unknown to the [`Catalog`] are ignored.
    pub fn select_size(&mut self, id: SizeId) {
        if self.catalog.size(id.as_str()).is_none() {
            log::debug!("ignoring unknown size `{id}`");
            return;
        }
        self.fields.duration = DurationSelection::Size(Some(id));
    }

    /// Chooses a number of hours, switching to [`PricingMode::ByHours`].
    ///
    /// Hours not bookable in the [`Catalog`] are ignored.
    pub fn select_hours(&mut self, hours: Hours) {
        if self.catalog.hour_block(hours).is_none() {
            log::debug!("ignoring unbookable {hours} hours");
            return;
        }
        self.fields.duration = DurationSelection::Hours(hours);
    }

    /// Chooses a service.
    pub fn select_service(&mut self, service: impl Into<ServiceChoice>) {
        self.fields.service = Some(service.into());
    }

    /// Chooses an address.
    pub fn select_address(&mut self, id: address::Id) {
        self.fields.address = Some(id);
    }

    /// Sets the [`DateMode`] of a scheduled booking.
    ///
    /// Switching to [`DateMode::SingleDate`] drops the chosen multiple dates.
    pub fn set_date_mode(&mut self, mode: DateMode) {
        if self.is_instant("date mode") {
            return;
        }
        let today = self.clock.today();
        let f = &mut self.fields;
        f.date_mode = mode;
        match mode {
            DateMode::SingleDate => f.schedule.clear(),
            DateMode::RecurringWeekdays => {
                f.schedule.set_rule(f.weekdays, today);
            }
            DateMode::MultiDateManual => {
                f.schedule.set_rule(Weekdays::NONE, today);
            }
        }
    }

    /// Chooses a single date.
    ///
    /// Past dates are ignored.
    pub fn select_date(&mut self, date: Date) {
        if self.is_instant("date") {
            return;
        }
        if date < self.clock.today() {
            log::debug!("ignoring past date {date}");
            return;
        }
        self.fields.date = Some(date);
    }

    /// Toggles one of multiple dates.
    ///
    /// Past dates are ignored.
    pub fn toggle_date(&mut self, date: Date) {
        if self.is_instant("dates") {
            return;
        }
        let today = self.clock.today();
        _ = self.fields.schedule.toggle(date, today);
    }

    /// Sets the recurring [`Weekdays`].
    ///
    /// They populate the chosen dates in [`DateMode::RecurringWeekdays`]
    /// only.
    pub fn set_weekdays(&mut self, weekdays: Weekdays) {
        if self.is_instant("weekdays") {
            return;
        }
        self.fields.weekdays = weekdays;
        if self.fields.date_mode == DateMode::RecurringWeekdays {
            let today = self.clock.today();
            self.fields.schedule.set_rule(weekdays, today);
        }
    }

    /// Toggles a single recurring [`Weekday`].
    pub fn toggle_weekday(&mut self, day: Weekday) {
        self.set_weekdays(self.fields.weekdays.toggled(day));
    }

    /// Shows the provided `month` in the calendar, populating it with the
    /// recurring weekdays.
    pub fn show_month(&mut self, month: CalendarMonth) {
        let today = self.clock.today();
        self.fields.schedule.show(month, today);
    }

    /// Clears every chosen date and the recurring [`Weekdays`].
    pub fn clear_dates(&mut self) {
        if self.is_instant("dates") {
            return;
        }
        self.fields.date = None;
        self.fields.weekdays = Weekdays::NONE;
        self.fields.schedule.clear();
    }

    /// Drops the provided `dates` from the chosen ones, keeping the
    /// recurring [`Weekdays`].
    ///
    /// Dates not being chosen are ignored.
    pub fn drop_dates(&mut self, dates: impl IntoIterator<Item = Date>) {
        let today = self.clock.today();
        for date in dates {
            if self.fields.schedule.contains(date) {
                _ = self.fields.schedule.toggle(date, today);
            } else if self.fields.date == Some(date) {
                self.fields.date = None;
            }
        }
    }

    /// Chooses a time.
    ///
    /// Only an exact [`TimeSlot`] can be chosen for a scheduled booking.
    pub fn select_time(&mut self, slot: TimeSlot) {
        if self.is_instant("time") {
            return;
        }
        if slot.is_asap() {
            log::debug!("ignoring `ASAP` time of a scheduled booking");
            return;
        }
        self.fields.time = Some(slot);
    }

    /// Toggles an [`add_on::AddOn`].
    pub fn toggle_add_on(&mut self, id: add_on::Id) {
        if !self.fields.add_ons.remove(&id) {
            _ = self.fields.add_ons.insert(id);
        }
    }

    /// Replaces the known per-visit prices of [`add_on::AddOn`]s.
    pub fn set_add_on_prices(&mut self, prices: add_on::Prices) {
        self.add_on_prices = prices;
    }

    /// Sets the [`PaymentMode`].
    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.fields.payment_mode = mode;
    }

    /// Returns every field to its default.
    ///
    /// Known [`add_on::AddOn`] prices are kept, as they don't describe a
    /// booking.
    pub fn reset(&mut self) {
        self.fields = Fields::new(self.clock.today());
    }

    /// Returns the price [`Multiplier`] of the chosen service.
    #[must_use]
    pub fn multiplier(&self) -> Multiplier {
        self.fields
            .service
            .as_ref()
            .map_or(Multiplier::ONE, |s| {
                self.catalog.multiplier_for_service(&s.name)
            })
    }

    /// Returns the price of the chosen duration before the service
    /// [`Multiplier`] is applied.
    #[must_use]
    pub fn list_price(&self) -> Money {
        match &self.fields.duration {
            DurationSelection::Size(Some(id)) => {
                self.catalog.price_for_size(id.as_str())
            }
            DurationSelection::Size(None) => {
                self.catalog.price_for_hours(self.catalog.default_hours())
            }
            DurationSelection::Hours(h) => self.catalog.price_for_hours(*h),
        }
    }

    /// Returns the price of the chosen duration and service, rounded to whole
    /// currency units.
    #[must_use]
    pub fn base_price(&self) -> Money {
        self.multiplier().apply(self.list_price())
    }

    /// Returns the per-visit price of the chosen add-ons.
    #[must_use]
    pub fn add_ons_total(&self) -> Money {
        self.add_on_prices
            .total(&self.fields.add_ons, self.catalog.currency())
    }

    /// Returns the price of a single visit.
    #[must_use]
    pub fn per_visit_price(&self) -> Money {
        self.base_price() + self.add_ons_total()
    }

    /// Returns the price of all the visits.
    #[must_use]
    pub fn total_price(&self) -> Money {
        let visits = u32::try_from(self.visit_count()).unwrap_or(u32::MAX);
        self.per_visit_price() * visits
    }

    /// Returns the dates of every visit in ascending order.
    ///
    /// Multiple chosen dates take precedence over a single one.
    #[must_use]
    pub fn final_dates(&self) -> Vec<Date> {
        let dates = self.selected_dates();
        if dates.is_empty() {
            self.fields.date.into_iter().collect()
        } else {
            dates
        }
    }

    /// Returns the number of visits, which is at least one.
    #[must_use]
    pub fn visit_count(&self) -> usize {
        self.final_dates().len().max(1)
    }

    /// Returns the expected duration of a single visit, if it's known.
    #[must_use]
    pub fn duration(&self) -> Option<Minutes> {
        match &self.fields.duration {
            DurationSelection::Size(id) => id
                .as_ref()
                .and_then(|id| self.catalog.size(id.as_str()))
                .map(|tier| tier.duration),
            DurationSelection::Hours(h) => Some(h.minutes()),
        }
    }

    /// Returns the [`Validity`] of every [`Field`].
    #[must_use]
    pub fn validity(&self) -> Validity {
        let f = &self.fields;
        let instant = f.booking_type == BookingType::Instant;
        Validity {
            size: match &f.duration {
                DurationSelection::Size(id) => id.is_some(),
                DurationSelection::Hours(_) => true,
            },
            duration: match f.duration {
                DurationSelection::Size(_) => true,
                DurationSelection::Hours(h) => h >= self.catalog.min_hours(),
            },
            date: instant || !self.final_dates().is_empty(),
            time: instant || f.time.is_some(),
            service: f.service.is_some(),
            address: f.address.is_some(),
        }
    }

    /// Indicates whether this [`Draft`] is ready to be submitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validity().is_complete()
    }

    /// Indicates whether some date or dates are chosen along with a time.
    #[must_use]
    pub fn has_date_and_time(&self) -> bool {
        !self.final_dates().is_empty() && self.fields.time.is_some()
    }

    /// Checks whether this [`Draft`] is an instant booking, logging the
    /// ignored edit of the provided `what` if so.
    fn is_instant(&self, what: &str) -> bool {
        let instant = self.fields.booking_type == BookingType::Instant;
        if instant {
            log::debug!("ignoring {what} edit of an instant booking");
        }
        instant
    }
}
