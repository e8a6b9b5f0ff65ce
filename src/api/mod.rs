//! REST plumbing: endpoint table, HTTP client, background call manager and
//! the view models decoded from list endpoints.

pub mod client;
pub mod manager;
pub mod models;

pub use client::{ApiClient, ApiError, ApiReply, ApiRequest, Endpoint};
pub use manager::{ApiManager, RefreshTarget, Refreshed};
