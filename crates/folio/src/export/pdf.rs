//! PDF export backend.
//!
//! Writes a single-page PDF with `pdf-writer`. Text is set in the base-14
//! Helvetica face, so no font program is embedded. Images become
//! Flate-compressed RGB XObjects with an optional soft mask for alpha.

mod helvetica;

use log::{debug, info};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};

use folio_core::{
    color::Color,
    draw::{Document, DrawOp, ImagePlacement, LineSegment, RasterImage, TextRun},
    geometry::Point,
};

use super::{Error, Exporter};

const FONT_NAME: Name<'static> = Name(b"F1");

/// Zlib level used for the content stream and image data.
const COMPRESSION_LEVEL: u8 = 6;

/// Exports a [`Document`] as a one-page PDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PdfExporter {
    fn export(&self, document: &Document) -> Result<Vec<u8>, Error> {
        let mut refs = RefAllocator::default();
        let catalog_id = refs.next();
        let pages_id = refs.next();
        let page_id = refs.next();
        let content_id = refs.next();
        let font_id = refs.next();

        let mut pdf = Pdf::new();

        let image_names = embed_images(&mut pdf, &mut refs, document);
        let content = page_content(document, &image_names);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&content, COMPRESSION_LEVEL);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);

        let size = document.size();
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, size.width(), size.height()))
            .parent(pages_id)
            .contents(content_id);
        {
            let mut resources = page.resources();
            resources.fonts().pair(FONT_NAME, font_id);
            if !image_names.is_empty() {
                let mut x_objects = resources.x_objects();
                for (name, id) in &image_names {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }
        page.finish();

        let bytes = pdf.finish();
        info!(bytes = bytes.len(), images = image_names.len(); "PDF encoded");

        Ok(bytes)
    }
}

/// Hands out consecutive indirect object ids, starting at 1.
#[derive(Debug, Default)]
struct RefAllocator {
    last: i32,
}

impl RefAllocator {
    fn next(&mut self) -> Ref {
        self.last += 1;
        Ref::new(self.last)
    }
}

/// Writes one XObject per image, returning the resource name and id of each
/// in drawing order.
fn embed_images(pdf: &mut Pdf, refs: &mut RefAllocator, document: &Document) -> Vec<(String, Ref)> {
    document
        .images()
        .enumerate()
        .map(|(index, placement)| {
            let name = format!("Im{}", index + 1);
            let id = embed_raster(pdf, refs, placement.raster());
            debug!(name = name.as_str(), image_id = placement.id(); "Image embedded");
            (name, id)
        })
        .collect()
}

fn embed_raster(pdf: &mut Pdf, refs: &mut RefAllocator, raster: &RasterImage) -> Ref {
    let width = raster.width() as i32;
    let height = raster.height() as i32;

    let mask_id = raster.alpha_channel().map(|alpha| {
        let id = refs.next();
        let data = miniz_oxide::deflate::compress_to_vec_zlib(&alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(id, &data);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        id
    });

    let id = refs.next();
    let data =
        miniz_oxide::deflate::compress_to_vec_zlib(&raster.rgb_channels(), COMPRESSION_LEVEL);
    let mut image = pdf.image_xobject(id, &data);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        image.s_mask(mask_id);
    }

    id
}

/// Builds the uncompressed page content stream.
fn page_content(document: &Document, image_names: &[(String, Ref)]) -> Vec<u8> {
    let mut content = Content::new();
    let size = document.size();

    if let Some(background) = document.background() {
        let [r, g, b] = background.to_rgb_components();
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(0.0, 0.0, size.width(), size.height());
        content.fill_nonzero();
        content.restore_state();
    }

    let stroke = document.stroke();
    let [r, g, b] = stroke.color().to_rgb_components();
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(stroke.width());

    let mut images = image_names.iter();
    for op in document.ops() {
        match op {
            DrawOp::Text(run) => write_text(&mut content, run, document),
            DrawOp::Line(line) => write_segments(&mut content, std::slice::from_ref(line)),
            DrawOp::Border(border) => write_segments(&mut content, border.segments()),
            DrawOp::Image(placement) => {
                if let Some((name, _)) = images.next() {
                    write_image(&mut content, placement, name);
                }
            }
        }
    }

    content.finish().to_vec()
}

/// Left end of the baseline that centers `run` on its anchor.
fn text_origin(run: &TextRun, font_size: f32) -> Point {
    let width = helvetica::text_width(run.text(), font_size);
    run.anchor().sub_point(Point::new(width / 2.0, 0.0))
}

fn write_text(content: &mut Content, run: &TextRun, document: &Document) {
    let style = document.text_style();
    let origin = text_origin(run, style.font_size());

    content.begin_text();
    set_fill(content, style.color());
    content.set_font(FONT_NAME, style.font_size());
    content.next_line(origin.x(), origin.y());
    content.show(Str(&helvetica::encode_win_ansi(run.text())));
    content.end_text();
}

fn write_segments(content: &mut Content, segments: &[LineSegment]) {
    for segment in segments {
        content.move_to(segment.from().x(), segment.from().y());
        content.line_to(segment.to().x(), segment.to().y());
    }
    content.stroke();
}

fn write_image(content: &mut Content, placement: &ImagePlacement, name: &str) {
    let bounds = placement.bounds();
    content.save_state();
    content.transform([
        bounds.width(),
        0.0,
        0.0,
        bounds.height(),
        bounds.min_x(),
        bounds.min_y(),
    ]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

fn set_fill(content: &mut Content, color: Color) {
    let [r, g, b] = color.to_rgb_components();
    content.set_fill_rgb(r, g, b);
}
