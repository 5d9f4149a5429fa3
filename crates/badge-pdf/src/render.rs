//! Per-badge PDF content: clip region, background, border, and text.
//!
//! Each badge is emitted as a self-contained op run inside a saved
//! graphics state, mirrored about its own vertical centerline because
//! the acetate sheet is applied to the print face-down. Registration
//! marks are drawn elsewhere and are never mirrored or offset.

use crate::config::{BadgeOptions, Config, FontConfig};
use crate::types::BadgeRecord;
use badge_mesh::shape::{circle_outline, rounded_rect_outline};
use badge_mesh::BadgeShape;
use printpdf::*;

const BORDER_THICKNESS_PT: f32 = 0.6;
const CIRCLE_SEGMENTS: usize = 48;

/// The resolved font for one text line: an embedded TTF or the builtin
/// Helvetica fallback.
pub(crate) enum LineFont {
    Parsed { id: FontId, font: ParsedFont },
    Builtin,
}

pub(crate) struct FontSet {
    lines: [LineFont; 3],
}

impl FontSet {
    /// Resolve the configured fonts, embedding each distinct TTF once.
    /// A font file that cannot be read or parsed degrades to Helvetica
    /// with a warning, matching how a missing background image behaves.
    pub(crate) fn load(doc: &mut PdfDocument, fonts: &FontConfig) -> FontSet {
        let mut cache: Vec<(String, FontId, ParsedFont)> = Vec::new();
        let lines = [0usize, 1, 2].map(|i| {
            let spec = fonts.line(i);
            let Some(path) = spec.font_name.as_deref() else {
                return LineFont::Builtin;
            };

            if let Some((_, id, font)) = cache.iter().find(|(p, _, _)| p == path) {
                return LineFont::Parsed {
                    id: id.clone(),
                    font: font.clone(),
                };
            }

            match load_parsed_font(doc, path) {
                Some((id, font)) => {
                    cache.push((path.to_string(), id.clone(), font.clone()));
                    LineFont::Parsed { id, font }
                }
                None => {
                    log::warn!("could not load font '{path}', falling back to Helvetica");
                    LineFont::Builtin
                }
            }
        });
        FontSet { lines }
    }

    fn line(&self, index: usize) -> &LineFont {
        &self.lines[index.min(2)]
    }
}

fn load_parsed_font(doc: &mut PdfDocument, path: &str) -> Option<(FontId, ParsedFont)> {
    let bytes = std::fs::read(path).ok()?;
    let mut warnings = Vec::new();
    let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings)?;
    let id = doc.add_font(&font);
    Some((id, font))
}

/// A background image embedded once and reused by every badge.
pub(crate) struct Background {
    pub id: XObjectId,
    pub width_px: u32,
    pub height_px: u32,
}

/// Decode and embed the configured background image. Opacity is
/// pre-composited over white so the PDF needs no transparency state.
/// Failures degrade to the plain white background with a warning.
pub(crate) fn load_background(doc: &mut PdfDocument, options: &BadgeOptions) -> Option<Background> {
    let path = options.background_image.as_deref()?;
    // `use printpdf::*` re-exports an `image` item; path to the crate root
    let decoded = match ::image::open(path) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("could not load background image '{path}': {e}; using white background");
            return None;
        }
    };

    let rgba = decoded.to_rgba8();
    let (width_px, height_px) = rgba.dimensions();
    let opacity = options.background_opacity.clamp(0.0, 1.0);

    let mut pixels = Vec::with_capacity((width_px * height_px * 3) as usize);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let alpha = (a as f32 / 255.0) * opacity;
        for channel in [r, g, b] {
            let blended = channel as f32 * alpha + 255.0 * (1.0 - alpha);
            pixels.push(blended.round() as u8);
        }
    }

    let raw = RawImage {
        pixels: RawImageData::U8(pixels),
        width: width_px as usize,
        height: height_px as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let id = doc.add_image(&raw);

    Some(Background {
        id,
        width_px,
        height_px,
    })
}

/// Ops for one badge with its lower-left corner at (x_mm, y_mm). The
/// caller has already applied any PdfOffset to the position.
pub(crate) fn badge_ops(
    record: &BadgeRecord,
    shape: &BadgeShape,
    config: &Config,
    fonts: &FontSet,
    background: Option<&Background>,
    x_mm: f32,
    y_mm: f32,
) -> Vec<Op> {
    let w = shape.width_mm;
    let h = shape.height_mm;
    let mut ops = vec![Op::SaveGraphicsState];

    // Mirror about the badge's vertical centerline.
    let center_x_pt = Mm(x_mm + w / 2.0).into_pt().0;
    ops.push(Op::SetTransformationMatrix {
        matrix: CurTransMat::Raw([-1.0, 0.0, 0.0, 1.0, 2.0 * center_x_pt, 0.0]),
    });

    // Everything below is confined to the badge silhouette.
    ops.push(Op::DrawPolygon {
        polygon: outline_polygon(&shape.outline, x_mm, y_mm, PaintMode::Clip),
    });

    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            icc_profile: None,
        }),
    });
    ops.push(Op::DrawPolygon {
        polygon: outline_polygon(&shape.outline, x_mm, y_mm, PaintMode::Fill),
    });

    if let Some(bg) = background {
        let scale = config.badge_options.background_scale.max(0.0);
        let target_w = w * scale;
        let target_h = h * scale;
        ops.push(Op::UseXobject {
            id: bg.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Mm(x_mm + (w - target_w) / 2.0).into_pt()),
                translate_y: Some(Mm(y_mm + (h - target_h) / 2.0).into_pt()),
                rotate: None,
                // dpi 25.4 makes one image pixel one millimeter, so the
                // scale factors below are in badge millimeters.
                scale_x: Some(target_w / bg.width_px as f32),
                scale_y: Some(target_h / bg.height_px as f32),
                dpi: Some(25.4),
            },
        });
    }

    ops.push(Op::SetFillColor {
        col: Color::Rgb(Rgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            icc_profile: None,
        }),
    });

    if config.badge_options.draw_border {
        let inset = config
            .badge_options
            .border_radius
            .clamp(0.0, w.min(h) / 2.0 - 0.5);
        let border = rounded_rect_outline(
            w - 2.0 * inset,
            h - 2.0 * inset,
            config.badge_options.border_radius,
        );
        ops.push(Op::SetOutlineColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(BORDER_THICKNESS_PT),
        });
        ops.push(Op::DrawPolygon {
            polygon: outline_polygon(&border, x_mm + inset, y_mm + inset, PaintMode::Stroke),
        });
    }

    for (index, text) in record.lines() {
        let spec = config.fonts.line(index);
        let font = fonts.line(index);
        let size = spec.font_size;

        let text_width_mm = text_width_mm(font, text, size);
        let text_x = x_mm + (w - text_width_mm) / 2.0;
        // y_position anchors the top of the text; drop one em to the baseline
        let baseline_y = y_mm + h - spec.y_position - size * 25.4 / 72.0;

        ops.push(Op::StartTextSection);
        match font {
            LineFont::Parsed { id, .. } => {
                ops.push(Op::SetFontSize {
                    font: id.clone(),
                    size: Pt(size),
                });
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Mm(text_x).into_pt(), Mm(baseline_y).into_pt()),
                });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: id.clone(),
                });
            }
            LineFont::Builtin => {
                ops.push(Op::SetFontSizeBuiltinFont {
                    font: BuiltinFont::Helvetica,
                    size: Pt(size),
                });
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Mm(text_x).into_pt(), Mm(baseline_y).into_pt()),
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font: BuiltinFont::Helvetica,
                });
            }
        }
        ops.push(Op::EndTextSection);
    }

    ops.push(Op::RestoreGraphicsState);
    ops
}

/// Ops for one filled registration mark circle.
pub(crate) fn filled_circle_ops(center: [f32; 2], radius_mm: f32) -> Op {
    let ring = circle_outline(radius_mm, CIRCLE_SEGMENTS);
    Op::DrawPolygon {
        polygon: outline_polygon(&ring, center[0], center[1], PaintMode::Fill),
    }
}

fn outline_polygon(outline: &[[f32; 2]], dx_mm: f32, dy_mm: f32, mode: PaintMode) -> Polygon {
    let points = outline
        .iter()
        .map(|p| LinePoint {
            p: Point {
                x: Mm(p[0] + dx_mm).into_pt(),
                y: Mm(p[1] + dy_mm).into_pt(),
            },
            bezier: false,
        })
        .collect();
    Polygon {
        rings: vec![PolygonRing { points }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

fn text_width_mm(font: &LineFont, text: &str, size_pt: f32) -> f32 {
    let width_pt = match font {
        LineFont::Parsed { font, .. } => {
            let mut width = 0.0;
            for ch in text.chars() {
                if let Some(glyph_id) = font.lookup_glyph_index(ch as u32) {
                    let advance = font.get_horizontal_advance(glyph_id);
                    width += (advance as f32 / 1000.0) * size_pt;
                }
            }
            width
        }
        LineFont::Builtin => helvetica_width_units(text) / 1000.0 * size_pt,
    };
    Mm::from(Pt(width_pt)).0
}

/// Sum of standard Helvetica AFM advance widths (per-mille of the em).
fn helvetica_width_units(text: &str) -> f32 {
    text.chars()
        .map(|ch| {
            let code = ch as usize;
            if (0x20..=0x7e).contains(&code) {
                HELVETICA_WIDTHS[code - 0x20] as f32
            } else {
                DEFAULT_GLYPH_WIDTH
            }
        })
        .sum()
}

const DEFAULT_GLYPH_WIDTH: f32 = 556.0;

/// Standard Helvetica advance widths for ASCII 0x20..=0x7e.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];
