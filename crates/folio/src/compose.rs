//! Turns normalized lines, prepared images and a layout into a [`Document`].

use log::debug;

use folio_core::draw::{Document, DrawOp, ImagePlacement, TextRun};

use crate::{
    FolioError, config::StyleConfig, input::TextField, layout::PageLayout,
    normalize::PreparedImage,
};

/// Builds the draw operations for one page.
///
/// Text lines come first, then the two rules, then each image followed by
/// its border and caption. `images` and `layout.slots()` are paired in order.
///
/// # Errors
///
/// Returns [`FolioError::InvalidInput`] when a style color cannot be parsed.
pub fn compose_document(
    lines: &[TextField],
    images: &[PreparedImage],
    layout: &PageLayout,
    style: &StyleConfig,
) -> Result<Document, FolioError> {
    let mut document = Document::new(layout.geometry().page())
        .with_background(style.background_color()?)
        .with_text_style(style.text_definition()?)
        .with_stroke(style.stroke_definition()?);

    for (line, anchor) in lines.iter().zip(layout.text_anchors()) {
        document.push(DrawOp::Text(TextRun::new(line.value(), *anchor)));
    }

    for rule in layout.rules() {
        document.push(DrawOp::Line(*rule));
    }

    for (image, slot) in images.iter().zip(layout.slots()) {
        document.push(DrawOp::Image(ImagePlacement::new(
            image.id(),
            slot.bounds(),
            image.raster().clone(),
        )));
        document.push(DrawOp::Border(slot.border()));
        document.push(DrawOp::Text(TextRun::new(
            image.caption(),
            slot.caption_anchor(),
        )));
    }

    debug!(ops = document.ops().len(); "Document composed");

    Ok(document)
}
