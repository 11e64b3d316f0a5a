//! Configuration types for Folio page generation.
//!
//! This module provides configuration structures that control page geometry,
//! layout constants and styling. All types implement [`serde::Deserialize`]
//! with every field defaulted, so a configuration file only needs to name the
//! values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PageConfig`] - Page dimensions.
//! - [`LayoutConfig`] - Image box size, line metrics and the state abbreviation.
//! - [`StyleConfig`] - Font size, colors and stroke width.
//!
//! # Example
//!
//! ```
//! # use folio::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.page().size().width(), 612.0);
//! assert_eq!(config.layout().state_abbreviation(), "FL");
//! assert!(config.style().text_color().is_ok());
//! ```

use serde::Deserialize;

use folio_core::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::Size,
};

use crate::FolioError;

/// Top-level configuration combining page, layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    page: PageConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(page: PageConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            page,
            layout,
            style,
        }
    }

    /// Returns the page configuration.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every dimension is usable before any layout work starts.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidInput`] naming the first offending
    /// setting.
    pub fn validate(&self) -> Result<(), FolioError> {
        if !self.page.size().is_positive() {
            return Err(FolioError::invalid_input(
                "page",
                format!(
                    "page size must be positive, got {}x{}",
                    self.page.width, self.page.height
                ),
            ));
        }

        let layout = &self.layout;
        if !layout.image_box_size().is_positive() {
            return Err(FolioError::invalid_input(
                "image_box_size",
                format!(
                    "image box size must be positive, got {}x{}",
                    layout.image_width, layout.image_height
                ),
            ));
        }
        check_positive("line_height", layout.line_height)?;
        check_non_negative("note_leading", layout.note_leading)?;
        check_non_negative("caption_offset", layout.caption_offset)?;

        check_positive("font_size", self.style.font_size)?;
        check_non_negative("stroke_width", self.style.stroke_width)?;
        self.style.text_color()?;
        self.style.stroke_color()?;
        self.style.background_color()?;

        Ok(())
    }
}

fn check_positive(setting: &str, value: f32) -> Result<(), FolioError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FolioError::invalid_input(
            setting,
            format!("must be a positive number, got {value}"),
        ))
    }
}

fn check_non_negative(setting: &str, value: f32) -> Result<(), FolioError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FolioError::invalid_input(
            setting,
            format!("must be zero or a positive number, got {value}"),
        ))
    }
}

/// Page dimensions in points. Defaults to US Letter (612x792).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    width: f32,
    height: f32,
}

impl PageConfig {
    /// Creates a page configuration with the given dimensions.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width(),
            height: size.height(),
        }
    }

    /// Returns the page size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(Size::letter())
    }
}

/// Layout constants for the text block and the image grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of every image box.
    image_width: f32,

    /// Height of every image box.
    image_height: f32,

    /// Vertical advance between text lines.
    line_height: f32,

    /// Extra advance above the `note` line.
    note_leading: f32,

    /// Distance from the bottom of an image box to its caption baseline.
    caption_offset: f32,

    /// State inserted between city and zip code when the two are merged.
    state_abbreviation: String,
}

impl LayoutConfig {
    /// Returns a copy with a different image box size.
    pub fn with_image_box_size(mut self, size: Size) -> Self {
        self.image_width = size.width();
        self.image_height = size.height();
        self
    }

    /// Returns a copy with a different line height.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Returns the size every image is resized and placed at.
    pub fn image_box_size(&self) -> Size {
        Size::new(self.image_width, self.image_height)
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn note_leading(&self) -> f32 {
        self.note_leading
    }

    pub fn caption_offset(&self) -> f32 {
        self.caption_offset
    }

    pub fn state_abbreviation(&self) -> &str {
        &self.state_abbreviation
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            image_width: 275.0,
            image_height: 275.0,
            line_height: 20.0,
            note_leading: 5.0,
            caption_offset: 15.0,
            state_abbreviation: String::from("FL"),
        }
    }
}

/// Visual styling for text, rules and borders.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_size: f32,
    text_color: String,
    stroke_color: String,
    stroke_width: f32,
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed text [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Color, FolioError> {
        parse_color("text_color", &self.text_color)
    }

    /// Returns the parsed stroke [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, FolioError> {
        parse_color("stroke_color", &self.stroke_color)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, FolioError> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Builds the text style for a document.
    pub fn text_definition(&self) -> Result<TextDefinition, FolioError> {
        Ok(TextDefinition::new(self.font_size, self.text_color()?))
    }

    /// Builds the stroke for rules and borders.
    pub fn stroke_definition(&self) -> Result<StrokeDefinition, FolioError> {
        Ok(StrokeDefinition::new(self.stroke_color()?, self.stroke_width))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            text_color: String::from("black"),
            stroke_color: String::from("black"),
            stroke_width: 1.0,
            background_color: None,
        }
    }
}

fn parse_color(setting: &str, value: &str) -> Result<Color, FolioError> {
    Color::new(value).map_err(|reason| FolioError::invalid_input(setting, reason))
}
