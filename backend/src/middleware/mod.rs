//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside individual handlers.

pub mod trace;

pub use trace::Trace;
