//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod generate_image;
pub mod health;
pub mod links;

pub use generate_image::generate_image_handler;
pub use health::health_handler;
pub use links::create_link_handler;
