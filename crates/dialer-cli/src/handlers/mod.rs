//! Command handlers that delegate to AppCore.
//!
//! Handlers take a [`CliContext`](crate::CliContext), call the core and
//! print the result. Business rules stay in `dialer-core`.

pub mod dial;
pub mod gateway;
pub mod serve;
pub mod user;
pub mod voip_app;

use dialer_core::PageRequest;

/// Page size large enough to show a whole table in one go.
pub(crate) fn whole_table() -> PageRequest {
    PageRequest::new(Some(dialer_core::domain::MAX_PAGE_LIMIT), None)
}
