//! Page geometry for the text block, the rule lines and the image grid.
//!
//! All coordinates are in page space (origin bottom-left, Y up). The layout
//! is a pure function of the displayed lines, the number of images and the
//! configuration, so computing it twice yields identical results.
//!
//! # Page anatomy
//!
//! ```text
//!  ┌──────────────────────────────┐ page height
//!  │          FILE NUMBER         │ ┐
//!  │           ADDRESS            │ │ text block, baselines start
//!  │     CITY, STATE, ZIP CODE    │ │ padding_y / 3 below the top
//!  │ ──────────────────────────── │ │ rule at start_y - 8
//!  │            * NOTE            │ │
//!  │ ──────────────────────────── │ ┘ rule at start_y - 28
//!  │  ┌───────┐      ┌───────┐    │ ← grid top: start_y - padding_y
//!  │  │   1   │      │   3   │    │
//!  │  └───────┘      └───────┘    │
//!  │   CAPTION        CAPTION     │
//!  │  ┌───────┐      ┌───────┐    │
//!  │  │   2   │      │   4   │    │
//!  │  └───────┘      └───────┘    │
//!  │   CAPTION        CAPTION     │ ← padding_y
//!  └──────────────────────────────┘ 0
//! ```
//!
//! Images fill a column top to bottom before the next column starts.

use log::{debug, trace};

use folio_core::{
    draw::{Border, LineSegment},
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{FolioError, config::AppConfig, input::TextField};

/// Number of image columns and rows in the grid.
const GRID_TRACKS: f32 = 2.0;

/// Distance from `start_y` down to the upper rule.
const RULE_TOP_OFFSET: f32 = 8.0;

/// Vertical gap between the two rules.
const RULE_GAP: f32 = 20.0;

/// Slack for floating-point comparisons against grid edges.
const EPSILON: f32 = 1e-3;

/// Derived page measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    page: Size,
    image: Size,
    text_block_height: f32,
    start_y: f32,
    padding_x: f32,
    padding_y: f32,
}

impl PageGeometry {
    /// Computes the geometry for `line_count` text lines above `image_count`
    /// images.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidInput`] when two image columns do not fit
    /// across the page, or when images are placed and two image rows do not
    /// fit below the text block. A text-only page may use the whole height.
    pub fn compute(
        line_count: usize,
        image_count: usize,
        config: &AppConfig,
    ) -> Result<Self, FolioError> {
        let page = config.page().size();
        let image = config.layout().image_box_size();

        let text_block_height = line_count as f32 * config.layout().line_height();
        let start_y = page.height() - text_block_height;
        let padding_x = (page.width() - GRID_TRACKS * image.width()) / (GRID_TRACKS + 1.0);
        let padding_y = (start_y - GRID_TRACKS * image.height()) / (GRID_TRACKS + 1.0);

        if padding_x < 0.0 {
            return Err(FolioError::invalid_input(
                "image_box_size",
                format!(
                    "two {}pt wide images do not fit across a {}pt wide page",
                    image.width(),
                    page.width()
                ),
            ));
        }
        if image_count > 0 && padding_y < 0.0 {
            return Err(FolioError::invalid_input(
                "fields",
                format!(
                    "{line_count} text lines leave {start_y}pt, \
                     too little for two {}pt high image rows",
                    image.height()
                ),
            ));
        }

        let geometry = Self {
            page,
            image,
            text_block_height,
            start_y,
            padding_x,
            padding_y,
        };
        debug!(geometry:?; "Page geometry computed");

        Ok(geometry)
    }

    pub fn page(&self) -> Size {
        self.page
    }

    /// Size of every image box.
    pub fn image_size(&self) -> Size {
        self.image
    }

    /// Height consumed by the text lines, excluding the note leading.
    pub fn text_block_height(&self) -> f32 {
        self.text_block_height
    }

    /// Y coordinate where the text block ends.
    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    /// Left margin, column gutter and right margin.
    pub fn padding_x(&self) -> f32 {
        self.padding_x
    }

    /// Gap above, between and below the image rows.
    pub fn padding_y(&self) -> f32 {
        self.padding_y
    }

    /// Y coordinate of the top edge of the first image row.
    pub fn grid_top(&self) -> f32 {
        self.start_y - self.padding_y
    }

    /// Horizontal distance from one column's left edge to the next one's.
    pub fn column_advance(&self) -> f32 {
        self.image.width() + self.padding_x
    }

    /// The region every image box lies within.
    pub fn image_region(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.page.width(), self.start_y)
            .inset(Insets::symmetric(self.padding_x, self.padding_y))
    }

    /// Baselines for the text lines, centered on the page.
    ///
    /// The first baseline sits one line height below `page height -
    /// padding_y / 3`; the note line drops by the extra note leading.
    pub fn text_anchors(&self, lines: &[TextField], config: &AppConfig) -> Vec<Point> {
        let layout = config.layout();
        let center_x = self.page.width() / 2.0;
        let mut y = self.page.height() - self.padding_y / 3.0;

        lines
            .iter()
            .map(|line| {
                y -= layout.line_height();
                if line.is_note() {
                    y -= layout.note_leading();
                }
                Point::new(center_x, y)
            })
            .collect()
    }

    /// The two rules beneath the text block, spanning the image columns.
    pub fn rules(&self) -> [LineSegment; 2] {
        let min_x = self.padding_x;
        let max_x = self.page.width() - self.padding_x;
        let upper = self.start_y - RULE_TOP_OFFSET;
        [
            LineSegment::horizontal(upper, min_x, max_x),
            LineSegment::horizontal(upper - RULE_GAP, min_x, max_x),
        ]
    }

    /// Places `count` image boxes.
    ///
    /// A vertical cursor starts at the grid top in the first column. When the
    /// next box would reach below `padding_y` the column is full: the cursor
    /// returns to the grid top and moves one column to the right.
    pub fn place_images(&self, count: usize, caption_offset: f32) -> Vec<ImageSlot> {
        let mut slots = Vec::with_capacity(count);
        let mut x = self.padding_x;
        let mut cursor = self.grid_top();

        for index in 0..count {
            if cursor - self.image.height() < self.padding_y - EPSILON {
                cursor = self.grid_top();
                x += self.column_advance();
            }

            let bounds = Bounds::new_from_origin(
                Point::new(x, cursor - self.image.height()),
                self.image,
            );
            let slot = ImageSlot::new(bounds, caption_offset);
            trace!(index, bounds:? = slot.bounds(); "Image slot placed");
            slots.push(slot);

            cursor -= self.image.height() + self.padding_y;
        }

        slots
    }
}

/// Where one image, its border and its caption go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSlot {
    bounds: Bounds,
    border: Border,
    caption_anchor: Point,
}

impl ImageSlot {
    fn new(bounds: Bounds, caption_offset: f32) -> Self {
        Self {
            bounds,
            border: Border::around(bounds),
            caption_anchor: Point::new(bounds.center().x(), bounds.min_y() - caption_offset),
        }
    }

    /// The image box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The border traced exactly on the image box.
    pub fn border(&self) -> Border {
        self.border
    }

    /// Baseline center of the caption, below the box.
    pub fn caption_anchor(&self) -> Point {
        self.caption_anchor
    }
}

/// The complete geometry of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    geometry: PageGeometry,
    text_anchors: Vec<Point>,
    rules: [LineSegment; 2],
    slots: Vec<ImageSlot>,
}

impl PageLayout {
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// One anchor per displayed text line, in order.
    pub fn text_anchors(&self) -> &[Point] {
        &self.text_anchors
    }

    pub fn rules(&self) -> &[LineSegment; 2] {
        &self.rules
    }

    /// One slot per placed image, in order.
    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }
}

/// Computes the full page layout for normalized lines and `image_count`
/// images.
///
/// # Errors
///
/// Returns [`FolioError::InvalidInput`] when the page cannot hold the image
/// grid needed for `image_count` images (see [`PageGeometry::compute`]).
///
/// # Examples
///
/// ```
/// # use folio::{TextField, calculate_layout, config::AppConfig};
/// let lines = vec![TextField::new("file_number", "123")];
/// let layout = calculate_layout(&lines, 3, &AppConfig::default()).unwrap();
///
/// assert_eq!(layout.slots().len(), 3);
/// assert!((layout.geometry().padding_x() - 62.0 / 3.0).abs() < 0.001);
/// ```
pub fn calculate_layout(
    lines: &[TextField],
    image_count: usize,
    config: &AppConfig,
) -> Result<PageLayout, FolioError> {
    let geometry = PageGeometry::compute(lines.len(), image_count, config)?;

    Ok(PageLayout {
        text_anchors: geometry.text_anchors(lines, config),
        rules: geometry.rules(),
        slots: geometry.place_images(image_count, config.layout().caption_offset()),
        geometry,
    })
}
