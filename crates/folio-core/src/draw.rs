//! Drawing definitions for a single output page.
//!
//! A page is described as a [`Document`]: the page size, the shared styles,
//! and an ordered list of [`DrawOp`]s that exporters replay against their
//! canvas. Nothing in this module knows about a particular output format.

mod document;
mod raster;
mod stroke;
mod text;

pub use document::{Border, Document, DrawOp, ImagePlacement, LineSegment, TextRun};
pub use raster::{RasterError, RasterImage};
pub use stroke::StrokeDefinition;
pub use text::TextDefinition;
