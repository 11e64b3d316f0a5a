//! Geometric primitives for page layout.
//!
//! This module provides the fundamental geometric types used by Folio to
//! place text baselines, rule lines and image boxes on a page.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Folio uses PDF user space, measured in points (1/72 inch):
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Bottom-left corner of the page at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases upward
//!
//! Exporters targeting a Y-down surface (such as SVG) flip the Y axis when
//! writing; layout code never does.

/// A 2D point in page space.
///
/// # Examples
///
/// ```
/// # use folio_core::geometry::Point;
/// let anchor = Point::new(306.0, 700.0);
/// let half_width = Point::new(40.0, 0.0);
///
/// let start = anchor.sub_point(half_width);
/// assert_eq!(start.x(), 266.0);
/// assert_eq!(start.y(), 700.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height of a page, image box, or any other rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// US Letter, 8.5 x 11 inches.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangular box with minimum and maximum coordinates.
///
/// In page space the minimum corner is the bottom-left corner and the maximum
/// corner is the top-right corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit edges.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds from the bottom-left corner and a size
    pub fn new_from_origin(origin: Point, size: Size) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + size.width,
            max_y: origin.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the four corners counter-clockwise starting at the origin:
    /// bottom-left, bottom-right, top-right, top-left.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Returns true if `other` lies entirely within these bounds, allowing
    /// `tolerance` of slack on every edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use folio_core::geometry::{Bounds, Point, Size};
    /// let page = Bounds::new_from_origin(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
    /// let inner = Bounds::new_from_origin(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
    /// assert!(page.contains(&inner, 0.0));
    /// assert!(!inner.contains(&page, 0.0));
    /// ```
    pub fn contains(&self, other: &Self, tolerance: f32) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }

    /// Returns true if the interiors of the two bounds overlap.
    ///
    /// Bounds that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Shrinks the bounds by removing insets from each side.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left(),
            min_y: self.min_y + insets.bottom(),
            max_x: self.max_x - insets.right(),
            max_y: self.max_y - insets.top(),
        }
    }
}

/// Spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates insets with one value for left/right and another for top/bottom
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}
