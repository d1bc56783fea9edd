//! [`Query`] collection related to [`AddOn`]s.

use common::operations::All;

use crate::domain::AddOn;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries every available [`AddOn`].
pub type AddOns = ApiQuery<All<AddOn>>;
