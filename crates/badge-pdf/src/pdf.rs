//! Single-page PDF assembly.
//!
//! Registration marks are drawn first at their planned positions, then
//! each badge at its slot plus the configured PdfOffset. Generation
//! happens entirely in memory; the output file only appears once the
//! whole document has been produced.

use crate::config::Config;
use crate::layout::{
    SheetLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, REGISTRATION_MARK_DIAMETER_MM,
};
use crate::render::{badge_ops, filled_circle_ops, load_background, FontSet};
use crate::types::{BadgeRecord, Result};
use badge_mesh::BadgeShape;
use printpdf::*;
use std::path::Path;

/// Render the badge sheet and write it to `output_path`.
pub async fn generate_pdf(
    records: &[BadgeRecord],
    shape: &BadgeShape,
    config: &Config,
    layout: &SheetLayout,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let records = records.to_vec();
    let shape = shape.clone();
    let config = config.clone();
    let layout = layout.clone();
    let output_path = output_path.as_ref().to_owned();

    // PDF generation is CPU-bound, spawn blocking
    let bytes =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(&records, &shape, &config, &layout))
            .await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

/// Render the badge sheet to PDF bytes.
///
/// Draws min(records, slots) badges; the layout planner has already
/// limited the slots to one page.
pub fn generate_pdf_bytes(
    records: &[BadgeRecord],
    shape: &BadgeShape,
    config: &Config,
    layout: &SheetLayout,
) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new("Badges");

    let fonts = FontSet::load(&mut doc, &config.fonts);
    let background = load_background(&mut doc, &config.badge_options);

    let mut ops = Vec::new();

    // Registration marks: fixed to the page, no PdfOffset, no mirroring.
    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });
    for mark in SheetLayout::registration_marks() {
        ops.push(filled_circle_ops(mark, REGISTRATION_MARK_DIAMETER_MM / 2.0));
    }

    for (record, slot) in records.iter().zip(&layout.slots) {
        let placed = slot.offset_by(&config.pdf_offsets);
        ops.extend(badge_ops(
            record,
            shape,
            config,
            &fonts,
            background.as_ref(),
            placed.x_mm,
            placed.y_mm,
        ));
    }

    doc.pages.push(PdfPage::new(
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        ops,
    ));

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}
