//! [`Flow`] of booking a cleaning.

use common::Percent;
use derive_more::{Display, Error, From};
use time::{Date, Weekday};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{submit_booking, Command, SubmitBooking},
    domain::{
        add_on,
        catalog::{Hours, SizeId},
        draft::{BookingType, DateMode, PaymentMode, PricingMode},
        offering,
        request::ValidationError,
        section::Progress,
        AddOn, Address, CalendarMonth, Draft, Receipt, Section, ServiceOffer,
        TimeSlot, Weekdays,
    },
    infra::api,
    query::{AddOns, DefaultAddress, Query, ServiceOffers},
    read::{summary, PriceBreakdown},
    Config, Service,
};

/// Phase of a [`Flow`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Booking is being configured.
    Editing,

    /// Booking is accepted by the backend.
    Submitted(Vec<Receipt>),
}

/// Session of booking a cleaning.
///
/// Drives a [`Draft`] together with the [`Progress`] of its [`Section`]s:
/// completing a [`Section`] focuses the next one, and confirming submits
/// every visit of the booking.
#[derive(Clone, Debug)]
pub struct Flow {
    /// Booking being configured.
    draft: Draft,

    /// [`Progress`] of the configuration [`Section`]s.
    progress: Progress<Section>,

    /// Current [`Phase`].
    phase: Phase,

    /// Bookable [`ServiceOffer`]s.
    offers: Vec<ServiceOffer>,

    /// Service preferred by the customer before starting.
    preferred: Option<offering::Id>,

    /// [`Address`] the cleaning happens at.
    address: Option<Address>,

    /// Available [`AddOn`]s.
    add_ons: Vec<AddOn>,

    /// Advertised discount for paying upfront.
    discount: Percent,
}

impl Flow {
    /// Creates a new [`Flow`] with nothing chosen yet.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            draft: Draft::new(config.catalog.clone(), config.clock),
            progress: Progress::default(),
            phase: Phase::Editing,
            offers: vec![],
            preferred: None,
            address: None,
            add_ons: vec![],
            discount: config.pay_now_discount,
        }
    }

    /// Loads the bookable services, the default address and the add-ons,
    /// preselecting the `preferred` service if it's bookable.
    ///
    /// Anything failing to load is left empty.
    pub async fn load<A>(
        &mut self,
        svc: &Service<A>,
        preferred: Option<offering::Id>,
    ) where
        Service<A>: Query<
                ServiceOffers,
                Ok = Vec<ServiceOffer>,
                Err = Traced<api::Error>,
            > + Query<
                DefaultAddress,
                Ok = Option<Address>,
                Err = Traced<api::Error>,
            > + Query<AddOns, Ok = Vec<AddOn>, Err = Traced<api::Error>>,
    {
        self.offers = svc.execute(ServiceOffers).await.unwrap_or_else(|e| {
            log::warn!("failed to load services: {e}");
            vec![]
        });
        self.address = svc.execute(DefaultAddress).await.unwrap_or_else(|e| {
            log::warn!("failed to load addresses: {e}");
            None
        });
        self.add_ons = svc.execute(AddOns::all()).await.unwrap_or_else(|e| {
            log::warn!("failed to load add-ons: {e}");
            vec![]
        });
        self.preferred = preferred;

        self.draft.set_add_on_prices(self.add_ons.iter().collect());
        self.preselect();
    }

    /// Returns the [`Draft`] being configured.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the [`Progress`] of the configuration [`Section`]s.
    #[must_use]
    pub fn progress(&self) -> &Progress<Section> {
        &self.progress
    }

    /// Returns the current [`Phase`].
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the bookable [`ServiceOffer`]s.
    #[must_use]
    pub fn offers(&self) -> &[ServiceOffer] {
        &self.offers
    }

    /// Returns the [`Address`] the cleaning happens at, if any.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns the available [`AddOn`]s.
    #[must_use]
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// Returns the collapsed summary of the provided [`Section`].
    #[must_use]
    pub fn summary(&self, section: Section) -> String {
        summary::section(&self.draft, section)
    }

    /// Returns the [`PriceBreakdown`] of the booking.
    #[must_use]
    pub fn price(&self) -> PriceBreakdown {
        PriceBreakdown::new(&self.draft, self.discount)
    }

    /// Indicates whether the booking can be confirmed.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.phase == Phase::Editing && self.draft.is_complete()
    }

    /// Expands the provided [`Section`] if it's collapsed, or collapses it
    /// otherwise.
    pub fn toggle_section(&mut self, section: Section) {
        self.progress.toggle(section);
    }

    /// Sets the [`BookingType`].
    pub fn set_booking_type(&mut self, ty: BookingType) {
        if self.draft.booking_type() == ty
            || !self.edit(|d| d.set_booking_type(ty))
        {
            return;
        }
        match ty {
            BookingType::Instant => {
                self.progress.mark_complete(Section::Datetime, false);
            }
            BookingType::Scheduled => {
                self.progress.mark_incomplete(Section::Datetime);
            }
        }
    }

    /// Sets the [`PricingMode`], dropping the previous choice.
    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        if !self.edit(|d| d.set_pricing_mode(mode)) {
            return;
        }
        let validity = self.draft.validity();
        if validity.size && validity.duration {
            self.progress.mark_complete(Section::Size, false);
        } else {
            self.progress.mark_incomplete(Section::Size);
        }
    }

    /// Chooses a house size tier and moves on to the next [`Section`].
    pub fn select_size(&mut self, id: SizeId) {
        if self.edit(|d| d.select_size(id))
            && self.draft.selected_size().is_some()
        {
            self.progress.mark_complete(Section::Size, true);
        }
    }

    /// Chooses a number of hours and moves on to the next [`Section`].
    pub fn select_hours(&mut self, hours: Hours) {
        if self.edit(|d| d.select_hours(hours))
            && self.draft.selected_hours() == Some(hours)
        {
            self.progress.mark_complete(Section::Size, true);
        }
    }

    /// Chooses one of the bookable services.
    ///
    /// Services not being offered are ignored.
    pub fn select_service(&mut self, id: offering::Id) {
        let Some(offer) = self.offers.iter().find(|o| o.id == id) else {
            log::debug!("ignoring unknown service {id}");
            return;
        };
        if self.phase == Phase::Editing {
            self.draft.select_service(offer);
        }
    }

    /// Chooses the [`Address`] the cleaning happens at.
    pub fn select_address(&mut self, address: Address) {
        if self.edit(|d| d.select_address(address.id)) {
            self.address = Some(address);
        }
    }

    /// Sets the [`DateMode`].
    pub fn set_date_mode(&mut self, mode: DateMode) {
        _ = self.edit(|d| d.set_date_mode(mode));
        self.check_datetime();
    }

    /// Chooses a single date.
    pub fn select_date(&mut self, date: Date) {
        _ = self.edit(|d| d.select_date(date));
        self.check_datetime();
    }

    /// Toggles one of multiple dates.
    pub fn toggle_date(&mut self, date: Date) {
        _ = self.edit(|d| d.toggle_date(date));
        self.check_datetime();
    }

    /// Sets the recurring [`Weekdays`].
    pub fn set_weekdays(&mut self, weekdays: Weekdays) {
        _ = self.edit(|d| d.set_weekdays(weekdays));
        self.check_datetime();
    }

    /// Toggles a single recurring [`Weekday`].
    pub fn toggle_weekday(&mut self, day: Weekday) {
        _ = self.edit(|d| d.toggle_weekday(day));
        self.check_datetime();
    }

    /// Shows the provided calendar `month`.
    pub fn show_month(&mut self, month: CalendarMonth) {
        _ = self.edit(|d| d.show_month(month));
        self.check_datetime();
    }

    /// Clears every chosen date.
    pub fn clear_dates(&mut self) {
        if self.edit(Draft::clear_dates)
            && self.draft.booking_type() == BookingType::Scheduled
        {
            self.progress.mark_incomplete(Section::Datetime);
        }
    }

    /// Chooses a time.
    pub fn select_time(&mut self, slot: TimeSlot) {
        _ = self.edit(|d| d.select_time(slot));
        self.check_datetime();
    }

    /// Toggles an [`AddOn`].
    pub fn toggle_add_on(&mut self, id: add_on::Id) {
        _ = self.edit(|d| d.toggle_add_on(id));
    }

    /// Sets the [`PaymentMode`].
    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        _ = self.edit(|d| d.set_payment_mode(mode));
    }

    /// Confirms the booking, submitting every visit of it.
    ///
    /// On success the [`Flow`] becomes [`Phase::Submitted`] and its
    /// [`Draft`] starts over. If the backend accepts some visits before
    /// refusing one, the accepted dates are dropped from the [`Draft`], so
    /// confirming again books the remaining visits only. Otherwise nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// If the booking is incomplete, already submitted, or the backend
    /// refuses any of its visits.
    pub async fn confirm<A>(
        &mut self,
        svc: &Service<A>,
    ) -> Result<Vec<Receipt>, ConfirmError>
    where
        Service<A>: Command<
            SubmitBooking,
            Ok = Vec<Receipt>,
            Err = Traced<submit_booking::ExecutionError>,
        >,
    {
        if self.phase != Phase::Editing {
            return Err(ConfirmError::AlreadySubmitted);
        }
        let cmd = SubmitBooking::new(&self.draft)?;
        let receipts = match svc.execute(cmd).await {
            Ok(receipts) => receipts,
            Err(e) => {
                let offset = self.draft.clock().offset();
                let accepted = e.as_ref().accepted();
                if !accepted.is_empty() {
                    self.draft.drop_dates(
                        accepted.iter().map(|r| r.request.local(offset).date()),
                    );
                    self.check_datetime();
                }
                return Err(e.into());
            }
        };

        self.draft.reset();
        self.progress.reset();
        self.preselect();
        self.phase = Phase::Submitted(receipts.clone());
        Ok(receipts)
    }

    /// Starts configuring a new booking after a submitted one.
    pub fn start_over(&mut self) {
        self.phase = Phase::Editing;
    }

    /// Applies the provided edit to the [`Draft`], unless the booking is
    /// already submitted.
    fn edit(&mut self, f: impl FnOnce(&mut Draft)) -> bool {
        if self.phase != Phase::Editing {
            log::debug!("ignoring edit of a submitted booking");
            return false;
        }
        f(&mut self.draft);
        true
    }

    /// Completes the [`Section::Datetime`] once both date and time are
    /// chosen, and reopens it once either is gone.
    fn check_datetime(&mut self) {
        if self.phase != Phase::Editing
            || self.draft.booking_type() != BookingType::Scheduled
        {
            return;
        }
        if self.draft.has_date_and_time() {
            self.progress.mark_complete(Section::Datetime, true);
        } else {
            self.progress.mark_incomplete(Section::Datetime);
        }
    }

    /// Selects the preferred service and the loaded [`Address`].
    fn preselect(&mut self) {
        if let Some(offer) = offering::preselect(&self.offers, self.preferred) {
            self.draft.select_service(offer);
        }
        if let Some(address) = &self.address {
            self.draft.select_address(address.id);
        }
    }
}

/// Error of confirming a [`Flow`].
#[derive(Debug, Display, Error, From)]
pub enum ConfirmError {
    /// Booking is incomplete.
    #[display("{_0}")]
    #[from]
    Invalid(ValidationError),

    /// Backend refused the booking.
    #[display("{}", _0.as_ref())]
    #[from]
    Submission(Traced<submit_booking::ExecutionError>),

    /// Booking is submitted already.
    #[display("Booking is already confirmed")]
    AlreadySubmitted,
}

impl ConfirmError {
    /// Returns the [`Receipt`]s of the visits accepted before the backend
    /// refused the booking.
    #[must_use]
    pub fn accepted(&self) -> &[Receipt] {
        match self {
            Self::Submission(e) => e.as_ref().accepted(),
            Self::Invalid(_) | Self::AlreadySubmitted => &[],
        }
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal::Decimal;
    use time::{Date, Month, UtcOffset, Weekday};

    use crate::{
        domain::{
            catalog::Hours,
            draft::{BookingType, DateMode, Field, PricingMode},
            request::ValidationError,
            AddOn, Address, Clock, Receipt, Section, ServiceOffer, TimeSlot,
            Weekdays,
        },
        infra::Fixture,
        Config, Service,
    };

    use super::{ConfirmError, Flow, Phase};

    fn config() -> Config {
        let now = DateTime::from_rfc3339("2026-11-01T04:00:00Z").unwrap();
        Config {
            clock: Clock::frozen(now, UtcOffset::from_hms(4, 0, 0).unwrap()),
            ..Config::default()
        }
    }

    fn fixture() -> Fixture {
        Fixture::new()
            .with_services(vec![
                ServiceOffer {
                    id: 1.into(),
                    name: "Standard Cleaning".to_owned(),
                    base_price: Decimal::from(150),
                },
                ServiceOffer {
                    id: 2.into(),
                    name: "Deep Cleaning".to_owned(),
                    base_price: Decimal::from(300),
                },
            ])
            .with_addresses(vec![Address {
                id: 7.into(),
                label: Some("Home".to_owned()),
                address: "Marina Walk 12".to_owned(),
                city: "Dubai".to_owned(),
                postal_code: None,
                is_default: true,
            }])
            .with_add_ons(vec![AddOn {
                id: 3.into(),
                name: "Inside fridge".to_owned(),
                price: Decimal::from(40),
            }])
    }

    fn date(day: u8) -> Date {
        Date::from_calendar_date(2026, Month::November, day).unwrap()
    }

    fn visit_dates(receipts: &[Receipt]) -> Vec<Date> {
        let dubai = UtcOffset::from_hms(4, 0, 0).unwrap();
        receipts
            .iter()
            .map(|r| r.request.local(dubai).date())
            .collect()
    }

    /// Configures a studio cleaning on every Tuesday of November at 10:00.
    fn book_tuesdays(flow: &mut Flow) {
        flow.select_size("studio".parse().unwrap());
        flow.set_date_mode(DateMode::RecurringWeekdays);
        flow.set_weekdays(Weekdays::of([Weekday::Tuesday]));
        flow.select_time(TimeSlot::at(10, 0).unwrap());
    }

    async fn loaded(api: &Fixture) -> (Flow, Service<Fixture>) {
        let svc = Service::new(config(), api.clone());
        let mut flow = Flow::new(svc.config());
        flow.load(&svc, Some(2.into())).await;
        (flow, svc)
    }

    #[tokio::test]
    async fn preselects_loaded_data() {
        let (flow, _) = loaded(&fixture()).await;

        assert_eq!(flow.draft().service().map(|s| s.id), Some(2.into()));
        assert_eq!(flow.draft().address(), Some(7.into()));
        assert_eq!(flow.add_ons().len(), 1);
        assert!(flow.progress().is_expanded(Section::Size));
    }

    #[tokio::test]
    async fn degrades_on_unavailable_backend() {
        let (flow, _) = loaded(&Fixture::new().unavailable("maintenance")).await;

        assert!(flow.offers().is_empty());
        assert_eq!(flow.address(), None);
        assert_eq!(flow.draft().service(), None);
    }

    #[tokio::test]
    async fn advances_through_sections() {
        let (mut flow, _) = loaded(&fixture()).await;

        flow.select_size("2bhk".parse().unwrap());
        assert!(flow.progress().is_completed(Section::Size));
        assert!(flow.progress().is_expanded(Section::Datetime));

        flow.select_date(date(3));
        assert!(!flow.progress().is_completed(Section::Datetime));

        flow.select_time(TimeSlot::at(9, 0).unwrap());
        assert!(flow.progress().all_completed());
        assert_eq!(flow.progress().expanded(), None);
        assert!(flow.can_confirm());
    }

    #[tokio::test]
    async fn ignores_unbookable_hours() {
        let (mut flow, _) = loaded(&fixture()).await;

        flow.select_hours(Hours::new(12));

        assert_eq!(flow.draft().selected_hours(), None);
        assert!(!flow.progress().is_completed(Section::Size));
        assert!(flow.progress().is_expanded(Section::Size));
    }

    #[tokio::test]
    async fn reopens_datetime_once_dates_are_gone() {
        let (mut flow, _) = loaded(&fixture()).await;
        book_tuesdays(&mut flow);
        assert!(flow.progress().all_completed());

        flow.set_weekdays(Weekdays::NONE);

        assert!(!flow.draft().validity().date);
        assert!(!flow.progress().is_completed(Section::Datetime));
        assert!(!flow.progress().all_completed());

        flow.set_date_mode(DateMode::MultiDateManual);
        flow.toggle_date(date(5));
        assert!(flow.progress().is_completed(Section::Datetime));

        flow.toggle_date(date(5));
        assert!(!flow.progress().is_completed(Section::Datetime));
    }

    #[tokio::test]
    async fn repeating_booking_type_keeps_progress() {
        let (mut flow, _) = loaded(&fixture()).await;
        flow.select_size("studio".parse().unwrap());
        flow.select_date(date(3));
        flow.select_time(TimeSlot::at(9, 0).unwrap());

        flow.set_booking_type(BookingType::Scheduled);

        assert!(flow.progress().all_completed());
        assert_eq!(flow.draft().selected_date(), Some(date(3)));
        assert!(flow.can_confirm());
    }

    #[tokio::test]
    async fn switching_pricing_mode_keeps_focus() {
        let (mut flow, _) = loaded(&fixture()).await;
        flow.select_size("studio".parse().unwrap());
        flow.toggle_section(Section::Size);

        flow.set_pricing_mode(PricingMode::ByHours);

        assert!(flow.progress().is_completed(Section::Size));
        assert!(flow.progress().is_expanded(Section::Size));

        flow.set_pricing_mode(PricingMode::BySize);

        assert!(!flow.progress().is_completed(Section::Size));
    }

    #[tokio::test]
    async fn instant_booking_completes_datetime() {
        let (mut flow, _) = loaded(&fixture()).await;

        flow.set_booking_type(BookingType::Instant);
        assert!(flow.progress().is_completed(Section::Datetime));
        assert_eq!(flow.summary(Section::Datetime), "Instant booking (ASAP)");

        flow.set_booking_type(BookingType::Scheduled);
        assert!(!flow.progress().is_completed(Section::Datetime));
    }

    #[tokio::test]
    async fn refuses_incomplete_booking() {
        let (mut flow, svc) = loaded(&fixture()).await;
        flow.select_date(date(3));

        let err = flow.confirm(&svc).await.unwrap_err();

        assert!(matches!(
            err,
            ConfirmError::Invalid(ValidationError::Incomplete(Field::Size)),
        ));
        assert_eq!(err.to_string(), "Please select a house size");
        assert_eq!(flow.phase(), &Phase::Editing);
    }

    #[tokio::test]
    async fn confirms_recurring_booking() {
        let api = fixture();
        let (mut flow, svc) = loaded(&api).await;
        flow.select_hours("3".parse().unwrap());
        flow.set_date_mode(DateMode::RecurringWeekdays);
        flow.set_weekdays(Weekdays::of([Weekday::Saturday]));
        flow.select_time(TimeSlot::at(14, 0).unwrap());
        flow.toggle_add_on(3.into());

        let receipts = flow.confirm(&svc).await.unwrap().len();

        assert_eq!(receipts, 4);
        assert_eq!(api.receipts().len(), 4);
        assert!(matches!(flow.phase(), Phase::Submitted(r) if r.len() == 4));
        assert_eq!(flow.draft().selected_time(), None);
        assert_eq!(flow.draft().service().map(|s| s.id), Some(2.into()));

        flow.select_size("studio".parse().unwrap());
        assert_eq!(flow.draft().selected_size(), None);

        flow.start_over();
        flow.select_size("studio".parse().unwrap());
        assert!(flow.draft().selected_size().is_some());
    }

    #[tokio::test]
    async fn keeps_draft_on_rejection() {
        let api = fixture().rejecting("No cleaners available");
        let (mut flow, svc) = loaded(&api).await;
        flow.select_size("studio".parse().unwrap());
        flow.select_date(date(5));
        flow.select_time(TimeSlot::at(11, 0).unwrap());

        let err = flow.confirm(&svc).await.unwrap_err();

        assert_eq!(err.to_string(), "No cleaners available");
        assert_eq!(flow.phase(), &Phase::Editing);
        assert_eq!(flow.draft().selected_date(), Some(date(5)));
        assert!(flow.can_confirm());
    }

    #[tokio::test]
    async fn retries_only_refused_visits() {
        let api = fixture().rejecting_after(2, "No cleaners on Nov 17");
        let (mut flow, svc) = loaded(&api).await;
        book_tuesdays(&mut flow);
        assert_eq!(flow.draft().visit_count(), 4);

        let err = flow.confirm(&svc).await.unwrap_err();

        assert_eq!(err.to_string(), "No cleaners on Nov 17");
        assert_eq!(visit_dates(err.accepted()), [date(3), date(10)]);
        assert_eq!(flow.phase(), &Phase::Editing);
        assert_eq!(flow.draft().final_dates(), [date(17), date(24)]);
        assert!(flow.progress().is_completed(Section::Datetime));

        let other = Service::new(config(), fixture());
        let receipts = flow.confirm(&other).await.unwrap();

        assert_eq!(visit_dates(&api.receipts()), [date(3), date(10)]);
        assert_eq!(visit_dates(&receipts), [date(17), date(24)]);
    }
}
