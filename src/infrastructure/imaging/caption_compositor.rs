//! Caption compositing over a fixed template image.

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use resvg::{tiny_skia, usvg};
use serde_json::json;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AppError;

/// Height in pixels of the caption band drawn over the top of the template.
pub const BAND_HEIGHT: u32 = 110;

const FONT_SIZE: u32 = 55;
const FONT_FAMILY: &str = "Arial, Helvetica, 'Liberation Sans', 'DejaVu Sans', sans-serif";

/// Fallback face shipped with the binary, so captions render on fontless hosts.
const BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");

/// Renders captions as a white text band over the top edge of a template image.
///
/// The template is read from disk on every call so it can be swapped without
/// a restart. Fonts are loaded once at construction.
pub struct CaptionCompositor {
    template_path: PathBuf,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl CaptionCompositor {
    /// Creates a compositor for the template at `template_path`.
    ///
    /// The bundled DejaVu Sans Bold and system fonts are always loaded;
    /// `fonts_dir` adds extra font files.
    pub fn new(template_path: impl Into<PathBuf>, fonts_dir: Option<&Path>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_font_data(BUNDLED_FONT.to_vec());
        fontdb.load_system_fonts();
        if let Some(dir) = fonts_dir {
            fontdb.load_fonts_dir(dir);
        }

        tracing::debug!(fonts = fontdb.len(), "Caption fonts loaded");

        Self {
            template_path: template_path.into(),
            fontdb: Arc::new(fontdb),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Number of font faces available to caption rendering.
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Composites `text` over the template and returns PNG bytes.
    ///
    /// CPU-bound; call from a blocking context.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `text` is empty.
    /// Returns [`AppError::Asset`] if the template cannot be read or decoded.
    /// Returns [`AppError::Internal`] if rendering or encoding fails.
    pub fn compose(&self, text: &str) -> Result<Vec<u8>, AppError> {
        if text.is_empty() {
            return Err(AppError::bad_request(
                "Caption text is required",
                json!({ "field": "text" }),
            ));
        }

        let mut base = self.load_template()?;
        let band = self.render_band(base.width(), text)?;

        image::imageops::overlay(&mut base, &band, 0, 0);

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(base)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| {
                AppError::internal("Failed to encode image", json!({ "reason": e.to_string() }))
            })?;

        Ok(bytes)
    }

    /// Checks that the template can be opened and returns its dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Asset`] if the template is missing or unreadable.
    pub fn check_template(&self) -> Result<(u32, u32), AppError> {
        ImageReader::open(&self.template_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| self.asset_error(e.to_string()))?
            .into_dimensions()
            .map_err(|e| self.asset_error(e.to_string()))
    }

    fn load_template(&self) -> Result<RgbaImage, AppError> {
        let image = ImageReader::open(&self.template_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| self.asset_error(e.to_string()))?
            .decode()
            .map_err(|e| self.asset_error(e.to_string()))?;

        Ok(image.to_rgba8())
    }

    fn render_band(&self, width: u32, text: &str) -> Result<RgbaImage, AppError> {
        let svg = caption_svg(width, text);

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };

        let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| {
            AppError::internal("Invalid caption markup", json!({ "reason": e.to_string() }))
        })?;

        let mut pixmap = tiny_skia::Pixmap::new(width, BAND_HEIGHT).ok_or_else(|| {
            AppError::internal("Invalid caption size", json!({ "width": width }))
        })?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        // tiny-skia stores premultiplied alpha; image expects straight RGBA.
        let raw: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        RgbaImage::from_raw(width, BAND_HEIGHT, raw).ok_or_else(|| {
            AppError::internal("Caption buffer size mismatch", json!({ "width": width }))
        })
    }

    fn asset_error(&self, reason: String) -> AppError {
        AppError::asset(
            "Failed to load template image",
            json!({ "path": self.template_path.display().to_string(), "reason": reason }),
        )
    }
}

/// Builds the SVG markup of the caption band for a template `width` pixels wide.
pub fn caption_svg(width: u32, text: &str) -> String {
    let x = width as f32 / 2.0;
    let y = BAND_HEIGHT * 65 / 100;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{BAND_HEIGHT}">
  <rect x="0" y="0" width="{width}" height="{BAND_HEIGHT}" fill="white"/>
  <text x="{x}" y="{y}" font-size="{FONT_SIZE}" fill="black" text-anchor="middle" dominant-baseline="middle" font-family="{FONT_FAMILY}" font-weight="600">{}</text>
</svg>"#,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
