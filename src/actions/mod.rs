//! Store actions
//!
//! Each action set owns a handle to the API client plus the local state it
//! renders from. Operations resolve to an [`ActionResult`](crate::api::ActionResult)
//! and only touch local state when the call succeeded.

mod analytics;
mod auth;
mod community;
mod dnp;
mod enforcement;

pub use analytics::AnalyticsActions;
pub use auth::AuthActions;
pub use community::CommunityActions;
pub use dnp::{DnpActions, SEARCH_LIMIT};
pub use enforcement::EnforcementActions;
