//! The draw-operation model of a single page.
//!
//! # Overview
//!
//! - [`Document`] - Page size, shared styles and an ordered list of operations
//! - [`DrawOp`] - One operation: text, rule line, image or image border
//! - [`TextRun`], [`LineSegment`], [`ImagePlacement`], [`Border`] - Operation payloads
//!
//! Operations are replayed in insertion order, so later operations paint over
//! earlier ones.

use std::sync::Arc;

use crate::{
    color::Color,
    draw::{RasterImage, StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    from: Point,
    to: Point,
}

impl LineSegment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// A horizontal segment at `y` spanning `min_x..=max_x`.
    pub fn horizontal(y: f32, min_x: f32, max_x: f32) -> Self {
        Self::new(Point::new(min_x, y), Point::new(max_x, y))
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }
}

/// Four segments tracing a rectangle edge-for-edge.
///
/// # Examples
///
/// ```
/// # use folio_core::draw::Border;
/// # use folio_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_origin(Point::new(10.0, 10.0), Size::new(50.0, 20.0));
/// let border = Border::around(bounds);
///
/// assert_eq!(border.segments().len(), 4);
/// assert_eq!(border.bounds(), bounds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    segments: [LineSegment; 4],
}

impl Border {
    /// Traces `bounds` counter-clockwise from its bottom-left corner:
    /// bottom edge, right edge, top edge, left edge.
    pub fn around(bounds: Bounds) -> Self {
        let [bottom_left, bottom_right, top_right, top_left] = bounds.corners();
        Self {
            segments: [
                LineSegment::new(bottom_left, bottom_right),
                LineSegment::new(bottom_right, top_right),
                LineSegment::new(top_right, top_left),
                LineSegment::new(top_left, bottom_left),
            ],
        }
    }

    pub fn segments(&self) -> &[LineSegment; 4] {
        &self.segments
    }

    /// Returns the rectangle traced by the segments.
    pub fn bounds(&self) -> Bounds {
        let points = self.segments.iter().flat_map(|s| [s.from, s.to]);
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x());
            min_y = min_y.min(p.y());
            max_x = max_x.max(p.x());
            max_y = max_y.max(p.y());
        }
        Bounds::new(min_x, min_y, max_x, max_y)
    }
}

/// A line of text centered horizontally on `anchor`, with its baseline at
/// `anchor.y()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    text: String,
    anchor: Point,
}

impl TextRun {
    pub fn new(text: impl Into<String>, anchor: Point) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// An image scaled to fill `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    id: String,
    bounds: Bounds,
    raster: Arc<RasterImage>,
}

impl ImagePlacement {
    /// Creates a placement for the image identified by `id`.
    pub fn new(id: impl Into<String>, bounds: Bounds, raster: Arc<RasterImage>) -> Self {
        Self {
            id: id.into(),
            bounds,
            raster,
        }
    }

    /// Returns the identifier of the source image.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }
}

/// One drawing step.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Centered text in the page text style
    Text(TextRun),
    /// A rule line in the page stroke
    Line(LineSegment),
    /// A placed image
    Image(ImagePlacement),
    /// A rectangular border in the page stroke
    Border(Border),
}

/// A single page described as draw operations.
///
/// # Examples
///
/// ```
/// # use folio_core::draw::{Document, DrawOp, LineSegment, TextRun};
/// # use folio_core::geometry::{Point, Size};
/// let mut document = Document::new(Size::letter());
/// document.push(DrawOp::Text(TextRun::new("HELLO", Point::new(306.0, 700.0))));
/// document.push(DrawOp::Line(LineSegment::horizontal(690.0, 20.0, 592.0)));
///
/// assert_eq!(document.ops().len(), 2);
/// assert_eq!(document.texts().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    size: Size,
    background: Option<Color>,
    text_style: TextDefinition,
    stroke: StrokeDefinition,
    ops: Vec<DrawOp>,
}

impl Document {
    /// Creates an empty page of the given size with default styles.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
            text_style: TextDefinition::default(),
            stroke: StrokeDefinition::default(),
            ops: Vec::new(),
        }
    }

    /// Sets the page background color.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Sets the text style used by every [`DrawOp::Text`].
    pub fn with_text_style(mut self, text_style: TextDefinition) -> Self {
        self.text_style = text_style;
        self
    }

    /// Sets the stroke used by every [`DrawOp::Line`] and [`DrawOp::Border`].
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    /// Appends an operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn text_style(&self) -> &TextDefinition {
        &self.text_style
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterates over text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Iterates over rule lines in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &LineSegment> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Iterates over image placements in drawing order.
    pub fn images(&self) -> impl Iterator<Item = &ImagePlacement> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Iterates over borders in drawing order.
    pub fn borders(&self) -> impl Iterator<Item = &Border> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Border(border) => Some(border),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Arc<RasterImage> {
        Arc::new(RasterImage::from_rgba(1, 1, vec![0, 0, 0, 255]).unwrap())
    }

    #[test]
    fn test_border_traces_bounds_exactly() {
        let bounds = Bounds::new(20.0, 54.0, 295.0, 329.0);
        let border = Border::around(bounds);
        let [bottom, right, top, left] = border.segments();

        assert_eq!(bottom.from(), Point::new(20.0, 54.0));
        assert_eq!(bottom.to(), Point::new(295.0, 54.0));
        assert_eq!(right.to(), Point::new(295.0, 329.0));
        assert_eq!(top.to(), Point::new(20.0, 329.0));
        assert_eq!(left.to(), Point::new(20.0, 54.0));
        assert_eq!(border.bounds(), bounds);
    }

    #[test]
    fn test_border_segments_are_connected() {
        let border = Border::around(Bounds::new(0.0, 0.0, 3.0, 4.0));
        let segments = border.segments();
        for i in 0..4 {
            assert_eq!(segments[i].to(), segments[(i + 1) % 4].from());
        }
    }

    #[test]
    fn test_horizontal_segment() {
        let line = LineSegment::horizontal(10.0, 1.0, 5.0);
        assert_eq!(line.from(), Point::new(1.0, 10.0));
        assert_eq!(line.to(), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_document_filters_ops_by_kind() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let mut document = Document::new(Size::letter());
        document.push(DrawOp::Text(TextRun::new("A", Point::new(1.0, 1.0))));
        document.push(DrawOp::Line(LineSegment::horizontal(5.0, 0.0, 10.0)));
        document.push(DrawOp::Image(ImagePlacement::new("a.png", bounds, pixel())));
        document.push(DrawOp::Border(Border::around(bounds)));
        document.push(DrawOp::Text(TextRun::new("B", Point::new(2.0, 2.0))));

        assert_eq!(document.ops().len(), 5);
        assert_eq!(
            document.texts().map(TextRun::text).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(document.lines().count(), 1);
        assert_eq!(document.images().map(ImagePlacement::id).collect::<Vec<_>>(), vec!["a.png"]);
        assert_eq!(document.borders().count(), 1);
    }

    #[test]
    fn test_document_styles() {
        let red = Color::new("red").unwrap();
        let document = Document::new(Size::new(100.0, 100.0))
            .with_background(Some(red))
            .with_text_style(TextDefinition::new(9.0, red))
            .with_stroke(StrokeDefinition::new(red, 0.25));

        assert_eq!(document.background(), Some(red));
        assert_eq!(document.text_style().font_size(), 9.0);
        assert_eq!(document.stroke().width(), 0.25);
        assert_eq!(document.size(), Size::new(100.0, 100.0));
    }
}
