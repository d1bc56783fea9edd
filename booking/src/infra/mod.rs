//! Infrastructure layer.

pub mod api;

pub use self::api::Api;
#[cfg(feature = "fixture")]
pub use self::api::Fixture;
