//! Domain definitions.

pub mod add_on;
pub mod address;
pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod draft;
pub mod offering;
pub mod request;
pub mod schedule;
pub mod section;
pub mod time_slot;

pub use self::{
    add_on::AddOn,
    address::Address,
    calendar::{CalendarMonth, Weekdays},
    catalog::Catalog,
    clock::Clock,
    draft::Draft,
    offering::ServiceOffer,
    request::{BookingRequest, Receipt},
    schedule::Schedule,
    section::Section,
    time_slot::TimeSlot,
};
