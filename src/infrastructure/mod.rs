//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and wraps the
//! rendering libraries.
//!
//! # Modules
//!
//! - [`imaging`] - Caption compositing over the template image
//! - [`persistence`] - JSON file and SQLite link repositories

pub mod imaging;
pub mod persistence;
