//! Reelmark backend library modules.
//!
//! The crate is laid out as a hexagon: [`domain`] holds types, services and
//! ports; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the driven ports against Postgres and the upstream
//! HTTP services.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
