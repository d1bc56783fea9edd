//! [`BookingRequest`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Display, Error, From};
use serde::Serialize;
use time::{PrimitiveDateTime, UtcOffset};

use super::{
    add_on, address,
    catalog::Minutes,
    draft::{BookingType, Draft, Field, PaymentMode},
    offering,
};

/// [`DateTimeOf`] a visit is scheduled at.
pub type ScheduledDateTime = DateTimeOf<unit::Schedule>;

/// [`DateTimeOf`] a booking was accepted at.
pub type SubmissionDateTime = DateTimeOf<unit::Submission>;

/// Request of a single visit handed to a backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BookingRequest {
    /// ID of the booked [`offering::ServiceOffer`].
    pub service_id: offering::Id,

    /// [`RequestKind`] of this [`BookingRequest`].
    pub booking_type: RequestKind,

    /// [`ScheduledDateTime`] of the visit.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub scheduled_date: ScheduledDateTime,

    /// Expected duration of the visit.
    pub duration_minutes: Minutes,

    /// ID of the [`address::Address`] of the visit.
    pub address_id: address::Id,

    /// IDs of the included [`add_on::AddOn`]s.
    pub add_on_ids: Vec<add_on::Id>,

    /// [`PaymentMethod`] of the visit.
    pub payment_method: PaymentMethod,
}

impl BookingRequest {
    /// Assembles [`BookingRequest`]s of every visit of the provided [`Draft`],
    /// in ascending date order.
    ///
    /// Instant bookings are scheduled at the current time.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Incomplete`] if the [`Draft`] misses some
    ///   required [`Field`].
    /// - [`ValidationError::OutOfRange`] if a visit cannot be represented as
    ///   a [`ScheduledDateTime`].
    pub fn assemble(draft: &Draft) -> Result<Vec<Self>, ValidationError> {
        use ValidationError as E;

        if let Some(field) = draft.validity().first_unmet() {
            return Err(E::Incomplete(field));
        }
        let service_id = draft.service().ok_or(E::Incomplete(Field::Service))?.id;
        let address_id = draft.address().ok_or(E::Incomplete(Field::Address))?;
        let duration_minutes =
            draft.duration().ok_or(E::Incomplete(Field::Size))?;

        let request = |scheduled_date: ScheduledDateTime| Self {
            service_id,
            booking_type: draft.booking_type().into(),
            scheduled_date,
            duration_minutes,
            address_id,
            add_on_ids: draft.add_ons().iter().copied().collect(),
            payment_method: draft.payment_mode().into(),
        };

        let clock = draft.clock();
        if draft.booking_type() == BookingType::Instant {
            return Ok(vec![request(clock.now().coerce())]);
        }

        let time = draft
            .selected_time()
            .and_then(|slot| slot.time())
            .ok_or(E::Incomplete(Field::Time))?;
        draft
            .final_dates()
            .into_iter()
            .map(|date| {
                ScheduledDateTime::from_local(date, time, clock.offset())
                    .map(request)
                    .map_err(E::OutOfRange)
            })
            .collect()
    }

    /// Returns the wall-clock date and time of this [`BookingRequest`] in the
    /// provided locale `offset`.
    #[must_use]
    pub fn local(&self, offset: UtcOffset) -> PrimitiveDateTime {
        let at =
            time::OffsetDateTime::from(self.scheduled_date).to_offset(offset);
        PrimitiveDateTime::new(at.date(), at.time())
    }
}

/// Kind of a [`BookingRequest`] as a backend knows it.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Cleaning as soon as possible.
    #[display("instant")]
    Instant,

    /// Cleaning at a scheduled time.
    #[display("single")]
    Single,
}

impl From<BookingType> for RequestKind {
    fn from(ty: BookingType) -> Self {
        match ty {
            BookingType::Instant => Self::Instant,
            BookingType::Scheduled => Self::Single,
        }
    }
}

/// Payment method of a [`BookingRequest`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Paid upfront by card.
    #[display("card")]
    Card,

    /// Paid in cash on the visit.
    #[display("cash")]
    Cash,
}

impl From<PaymentMode> for PaymentMethod {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::PayNow => Self::Card,
            PaymentMode::PayLater => Self::Cash,
        }
    }
}

/// Booking accepted by a backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    /// ID of the accepted booking.
    pub id: Id,

    /// Accepted [`BookingRequest`].
    pub request: BookingRequest,

    /// [`SubmissionDateTime`] when the booking was accepted.
    pub accepted_at: SubmissionDateTime,
}

/// ID of an accepted booking.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Id(i64);

/// Error of assembling a [`BookingRequest`].
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// Required [`Field`] is missing or invalid.
    #[display("Please select {}", _0.label())]
    Incomplete(#[error(not(source))] Field),

    /// Visit date and time are out of the supported range.
    #[display("Visit time is out of range: {_0}")]
    OutOfRange(time::error::ComponentRange),
}
