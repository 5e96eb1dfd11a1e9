//! Utility functions shared across the application.
//!
//! - [`key_generator`] - Short key generation and validation

pub mod key_generator;
