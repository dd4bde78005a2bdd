//! Schedule coordination backend.
//!
//! Users create schedules with date candidates, record availability for each
//! candidate and leave one comment per schedule. The crate is laid out as
//! ports and adapters: `domain` holds the model, ports and services,
//! `inbound::http` the Actix Web adapter and `outbound::persistence` the
//! Diesel adapter.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
