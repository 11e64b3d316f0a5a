//! Stroke definitions for rule lines and image borders.

use crate::color::Color;

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use folio_core::draw::StrokeDefinition;
/// use folio_core::color::Color;
///
/// // Default stroke (black, 1pt)
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.width(), 1.0);
///
/// let stroke = StrokeDefinition::new(Color::new("navy").unwrap(), 0.5);
/// assert_eq!(stroke.width(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    ///
    /// # Arguments
    ///
    /// * `color` - The stroke color
    /// * `width` - The stroke width in points
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
        }
    }
}
