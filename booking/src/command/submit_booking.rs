//! [`Command`] for submitting a booking.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{request::ValidationError, BookingRequest, Draft, Receipt},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for submitting every visit of a booking.
///
/// Visits are submitted one by one in ascending date order, stopping at the
/// first rejected one. Visits accepted before it are reported with
/// [`ExecutionError::Partial`].
#[derive(Clone, Debug)]
pub struct SubmitBooking {
    /// [`BookingRequest`]s of every visit.
    requests: Vec<BookingRequest>,
}

impl SubmitBooking {
    /// Creates a new [`SubmitBooking`] of the provided [`Draft`].
    ///
    /// # Errors
    ///
    /// If the [`Draft`] is not complete.
    pub fn new(draft: &Draft) -> Result<Self, ValidationError> {
        BookingRequest::assemble(draft).map(|requests| Self { requests })
    }

    /// Returns the [`BookingRequest`]s of every visit.
    #[must_use]
    pub fn requests(&self) -> &[BookingRequest] {
        &self.requests
    }
}

impl<A> Command<SubmitBooking> for Service<A>
where
    A: Api<Insert<BookingRequest>, Ok = Receipt, Err = Traced<api::Error>>,
{
    type Ok = Vec<Receipt>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitBooking { requests } = cmd;
        if requests.is_empty() {
            return Err(tracerr::new!(E::NoVisits));
        }

        let total = requests.len();
        let mut receipts = Vec::with_capacity(total);
        for request in requests {
            match self.api().execute(Insert(request)).await {
                Ok(receipt) => receipts.push(receipt),
                Err(e) if receipts.is_empty() => {
                    log::warn!("booking rejected: {e}");
                    return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
                }
                Err(e) => {
                    log::warn!(
                        "booking rejected after {} of {total} visits: {e}",
                        receipts.len(),
                    );
                    return Err(tracerr::new!(E::Partial {
                        accepted: receipts,
                        source: e.into_inner(),
                    }));
                }
            }
        }

        log::info!("booked {total} visit(s)");
        Ok(receipts)
    }
}

/// Error of [`SubmitBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error, its detail is meant for a customer as is.
    #[display("{_0}")]
    #[from]
    Api(api::Error),

    /// [`Api`] error after some visits are accepted already.
    #[display("{source}")]
    Partial {
        /// [`Receipt`]s of the accepted visits.
        accepted: Vec<Receipt>,

        /// [`Api`] error of the first rejected visit.
        source: api::Error,
    },

    /// No visit to submit.
    #[display("No visits to book")]
    NoVisits,
}

impl ExecutionError {
    /// Returns the [`Receipt`]s of the visits accepted before failing.
    #[must_use]
    pub fn accepted(&self) -> &[Receipt] {
        match self {
            Self::Partial { accepted, .. } => accepted,
            Self::Api(_) | Self::NoVisits => &[],
        }
    }
}
