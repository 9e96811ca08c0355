//! Personal expense tracker backend.
//!
//! Users register, authenticate with a bearer token and record expenses that
//! only they can read, change or delete.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
