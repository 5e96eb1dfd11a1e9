//! Core domain entities.
//!
//! - [`Link`] - A short key mapped to a destination URL and a caption

pub mod link;

pub use link::Link;
