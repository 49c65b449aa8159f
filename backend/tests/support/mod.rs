//! Shared integration test support.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod http;
pub mod in_memory;
