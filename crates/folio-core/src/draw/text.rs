//! Text style shared by every line and caption on a page.
//!
//! Folio draws all text in a single face (Helvetica in PDF output, a
//! Helvetica-compatible sans-serif stack in SVG output). Only the size and
//! color are configurable.

use crate::color::Color;

/// Defines the visual style for text runs.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font size | `12.0` |
/// | Color | black |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_size: f32,
    color: Color,
}

impl TextDefinition {
    /// Creates a new text definition.
    ///
    /// # Arguments
    ///
    /// * `font_size` - The font size in points.
    /// * `color` - The fill color for glyphs.
    pub fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color }
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the text color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: Color::default(),
        }
    }
}
