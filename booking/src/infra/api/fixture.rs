//! In-memory [`Api`] implementation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::{
    operations::{All, Insert, Select},
    DateTimeOf,
};
use tracerr::Traced;

use crate::{
    domain::{request, AddOn, Address, BookingRequest, Receipt, ServiceOffer},
    infra::api,
};
#[cfg(doc)]
use crate::infra::Api;

/// In-memory backend serving fixed collections and recording submitted
/// bookings.
///
/// Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct Fixture(Arc<Mutex<State>>);

/// State of a [`Fixture`].
#[derive(Debug, Default)]
struct State {
    /// Served [`Address`]es.
    addresses: Vec<Address>,

    /// Served [`ServiceOffer`]s.
    services: Vec<ServiceOffer>,

    /// Served [`AddOn`]s.
    add_ons: Vec<AddOn>,

    /// Accepted bookings.
    receipts: Vec<Receipt>,

    /// Rejection of submissions, if any.
    rejection: Option<Rejection>,

    /// Reason of the backend being unavailable, if it is.
    outage: Option<String>,
}

/// Rejection of submissions by a [`Fixture`].
#[derive(Debug)]
struct Rejection {
    /// Number of submissions accepted before rejecting.
    after: usize,

    /// Detail message of the rejection.
    detail: String,
}

impl Fixture {
    /// Creates a new empty [`Fixture`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the provided [`Address`]es.
    #[must_use]
    pub fn with_addresses(self, addresses: Vec<Address>) -> Self {
        self.state().addresses = addresses;
        self
    }

    /// Serves the provided [`ServiceOffer`]s.
    #[must_use]
    pub fn with_services(self, services: Vec<ServiceOffer>) -> Self {
        self.state().services = services;
        self
    }

    /// Serves the provided [`AddOn`]s.
    #[must_use]
    pub fn with_add_ons(self, add_ons: Vec<AddOn>) -> Self {
        self.state().add_ons = add_ons;
        self
    }

    /// Rejects every submission with the provided `detail` message.
    #[must_use]
    pub fn rejecting(self, detail: impl Into<String>) -> Self {
        self.rejecting_after(0, detail)
    }

    /// Accepts the first `n` submissions, then rejects every next one with the
    /// provided `detail` message.
    #[must_use]
    pub fn rejecting_after(self, n: usize, detail: impl Into<String>) -> Self {
        self.state().rejection = Some(Rejection {
            after: n,
            detail: detail.into(),
        });
        self
    }

    /// Makes every operation fail as if the backend was unreachable.
    #[must_use]
    pub fn unavailable(self, reason: impl Into<String>) -> Self {
        self.state().outage = Some(reason.into());
        self
    }

    /// Returns every accepted booking in the order of acceptance.
    #[must_use]
    pub fn receipts(&self) -> Vec<Receipt> {
        self.state().receipts.clone()
    }

    /// Locks the [`State`] of this [`Fixture`].
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks whether the backend is reachable.
    fn check_outage(state: &State) -> Result<(), Traced<api::Error>> {
        match &state.outage {
            Some(reason) => {
                Err(tracerr::new!(api::Error::Unavailable(reason.clone())))
            }
            None => Ok(()),
        }
    }
}

impl api::Api<Select<All<Address>>> for Fixture {
    type Ok = Vec<Address>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<All<Address>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.state();
        Self::check_outage(&state)?;
        Ok(state.addresses.clone())
    }
}

impl api::Api<Select<All<ServiceOffer>>> for Fixture {
    type Ok = Vec<ServiceOffer>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<All<ServiceOffer>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.state();
        Self::check_outage(&state)?;
        Ok(state.services.clone())
    }
}

impl api::Api<Select<All<AddOn>>> for Fixture {
    type Ok = Vec<AddOn>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<All<AddOn>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.state();
        Self::check_outage(&state)?;
        Ok(state.add_ons.clone())
    }
}

impl api::Api<Insert<BookingRequest>> for Fixture {
    type Ok = Receipt;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<BookingRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        Self::check_outage(&state)?;

        let accepted = state.receipts.len();
        if let Some(r) = state.rejection.as_ref().filter(|r| accepted >= r.after)
        {
            return Err(tracerr::new!(api::Error::Rejected(r.detail.clone())));
        }

        let id = i64::try_from(accepted).map_or(i64::MAX, |n| n + 1);
        let receipt = Receipt {
            id: request::Id::from(id),
            request,
            accepted_at: DateTimeOf::now(),
        };
        state.receipts.push(receipt.clone());
        Ok(receipt)
    }
}
