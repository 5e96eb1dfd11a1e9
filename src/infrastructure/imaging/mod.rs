//! Caption image rendering.
//!
//! [`CaptionCompositor`] rasterizes an SVG text band with `resvg` and
//! composites it over the template image with `image`.

pub mod caption_compositor;

pub use caption_compositor::{BAND_HEIGHT, CaptionCompositor};
