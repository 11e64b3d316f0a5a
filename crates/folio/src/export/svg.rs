//! SVG export backend.
//!
//! SVG's Y axis points down, so every page-space Y coordinate is flipped
//! against the page height. Images are inlined as base64 PNG data URIs.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use log::{debug, error};
use svg::node::{
    Text as SvgText,
    element::{self as svg_element, path::Data},
};

use folio_core::{
    draw::{Document, DrawOp, ImagePlacement, LineSegment, TextRun},
    geometry::Point,
};

use super::{Error, Exporter};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Exports a [`Document`] as a standalone SVG image.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for SvgExporter {
    fn export(&self, document: &Document) -> Result<Vec<u8>, Error> {
        let canvas = Canvas::new(document);
        let size = document.size();

        let mut svg = svg::Document::new()
            .set("width", size.width())
            .set("height", size.height())
            .set("viewBox", (0.0, 0.0, size.width(), size.height()));

        if let Some(background) = document.background() {
            svg = svg.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", &background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        for op in document.ops() {
            svg = match op {
                DrawOp::Text(run) => svg.add(canvas.text(run)),
                DrawOp::Line(line) => svg.add(canvas.line(line)),
                DrawOp::Border(border) => svg.add(canvas.outline(border.segments())),
                DrawOp::Image(placement) => svg.add(canvas.image(placement)?),
            };
        }

        debug!(ops = document.ops().len(); "SVG document rendered");
        Ok(svg.to_string().into_bytes())
    }
}

/// Converts page-space draw operations into SVG elements.
struct Canvas<'a> {
    document: &'a Document,
}

impl<'a> Canvas<'a> {
    fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Flips a page-space point into SVG user space.
    fn flip(&self, point: Point) -> (f32, f32) {
        (point.x(), self.document.size().height() - point.y())
    }

    fn text(&self, run: &TextRun) -> svg_element::Text {
        let style = self.document.text_style();
        let (x, y) = self.flip(run.anchor());
        svg_element::Text::new("")
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", style.font_size())
            .set("fill", &style.color())
            .set("fill-opacity", style.color().alpha())
            .add(SvgText::new(run.text()))
    }

    fn line(&self, line: &LineSegment) -> svg_element::Line {
        let (x1, y1) = self.flip(line.from());
        let (x2, y2) = self.flip(line.to());
        self.stroked(
            svg_element::Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2),
        )
    }

    /// A closed outline through the start of every segment.
    fn outline(&self, segments: &[LineSegment]) -> svg_element::Path {
        let mut data = Data::new();
        for (index, segment) in segments.iter().enumerate() {
            let point = self.flip(segment.from());
            data = if index == 0 {
                data.move_to(point)
            } else {
                data.line_to(point)
            };
        }
        self.stroked(
            svg_element::Path::new()
                .set("d", data.close())
                .set("fill", "none"),
        )
    }

    fn stroked<T: svg::Node>(&self, mut element: T) -> T {
        let stroke = self.document.stroke();
        element.assign("stroke", &stroke.color());
        element.assign("stroke-opacity", stroke.color().alpha());
        element.assign("stroke-width", stroke.width());
        element
    }

    fn image(&self, placement: &ImagePlacement) -> Result<svg_element::Image, Error> {
        let bounds = placement.bounds();
        let (x, y) = self.flip(Point::new(bounds.min_x(), bounds.max_y()));
        let href = png_data_uri(placement)?;

        Ok(svg_element::Image::new()
            .set("x", x)
            .set("y", y)
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("preserveAspectRatio", "none")
            .set("href", href))
    }
}

fn png_data_uri(placement: &ImagePlacement) -> Result<String, Error> {
    let raster = placement.raster();
    let image = RgbaImage::from_raw(raster.width(), raster.height(), raster.rgba().to_vec())
        .ok_or_else(|| {
            Error::Encode(format!(
                "image `{}` has a malformed pixel buffer",
                placement.id()
            ))
        })?;

    let mut png = Cursor::new(Vec::new());
    if let Err(err) = image.write_to(&mut png, ImageFormat::Png) {
        error!(image_id = placement.id(), err:err; "Failed to encode image as PNG");
        return Err(Error::Encode(err.to_string()));
    }

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png.into_inner())
    ))
}
