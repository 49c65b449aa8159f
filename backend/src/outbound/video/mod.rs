//! Video provider adapter implementing [`crate::domain::ports::VideoSearchSource`].

mod dto;
mod pexels_source;

pub use pexels_source::PexelsVideoSource;
