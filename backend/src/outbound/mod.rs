//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **auth_platform**: the managed auth service's REST API
//! - **email**: the transactional email provider
//! - **video**: the stock video search provider
//!
//! Adapters are thin translators between domain types and wire or row
//! representations. They contain no business logic.

pub mod auth_platform;
pub mod email;
mod http_body;
pub mod persistence;
pub mod video;
