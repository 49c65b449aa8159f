//! Inbound adapters that translate external requests into domain calls.
//!
//! The REST surface lives under [`http`]; framework details stay there.

pub mod http;
