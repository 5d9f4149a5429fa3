//! Sheet layout: where badges and registration marks go on the page.
//!
//! Everything here is in millimeters with the origin at the page's
//! lower-left corner (PDF convention). The planner computes a fixed
//! grid for one A4 page and centers the placed block on the page, so
//! the same slot positions feed both the PDF and the layout STL.

use crate::config::PdfOffset;
use crate::types::{BadgeError, Result};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_SIDE_MM: f32 = 20.0;
const MARGIN_TOP_MM: f32 = 20.0;
const MARGIN_BOTTOM_MM: f32 = 30.0;
const COLUMN_GUTTER_MM: f32 = 15.0;
const ROW_GUTTER_MM: f32 = 10.0;

pub const REGISTRATION_MARK_DIAMETER_MM: f32 = 5.0;
const REGISTRATION_EDGE_INSET_MM: f32 = 10.0;

/// Lower-left corner of one badge on the page, before any [`PdfOffset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSlot {
    pub x_mm: f32,
    pub y_mm: f32,
}

impl LayoutSlot {
    pub fn offset_by(&self, offset: &PdfOffset) -> LayoutSlot {
        LayoutSlot {
            x_mm: self.x_mm + offset.x_offset,
            y_mm: self.y_mm + offset.y_offset,
        }
    }
}

/// The planned grid for a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub badge_width_mm: f32,
    pub badge_height_mm: f32,
    pub columns: usize,
    /// Rows actually used by the placed badges.
    pub rows: usize,
    /// Maximum badges that fit on one page.
    pub capacity: usize,
    /// One slot per placed badge (min(requested, capacity)),
    /// left-to-right then top-to-bottom.
    pub slots: Vec<LayoutSlot>,
}

impl SheetLayout {
    /// Plan slot positions for up to `count` badges of the given size.
    ///
    /// The full grid's width and the placed rows' height are centered
    /// on the page, so a partially filled sheet still lines up with a
    /// jig generated for the same inputs.
    pub fn plan(badge_width_mm: f32, badge_height_mm: f32, count: usize) -> Result<SheetLayout> {
        let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_SIDE_MM;
        let usable_height = PAGE_HEIGHT_MM - MARGIN_TOP_MM - MARGIN_BOTTOM_MM;

        if badge_width_mm <= 0.0 || badge_height_mm <= 0.0 {
            return Err(BadgeError::Layout(format!(
                "badge size {badge_width_mm:.1}mm × {badge_height_mm:.1}mm is not printable"
            )));
        }
        if badge_width_mm > usable_width || badge_height_mm > usable_height {
            return Err(BadgeError::Layout(format!(
                "badge {badge_width_mm:.1}mm × {badge_height_mm:.1}mm does not fit the \
                 printable area {usable_width:.0}mm × {usable_height:.0}mm"
            )));
        }

        let columns = grid_count(usable_width, badge_width_mm, COLUMN_GUTTER_MM);
        let max_rows = grid_count(usable_height, badge_height_mm, ROW_GUTTER_MM);
        let capacity = columns * max_rows;

        let placed = count.min(capacity);
        let rows = placed.div_ceil(columns.max(1));

        let grid_width =
            columns as f32 * badge_width_mm + (columns as f32 - 1.0) * COLUMN_GUTTER_MM;
        let block_height = rows as f32 * badge_height_mm + (rows as f32 - 1.0) * ROW_GUTTER_MM;

        let x0 = (PAGE_WIDTH_MM - grid_width) / 2.0;
        let block_top = (PAGE_HEIGHT_MM + block_height) / 2.0;

        let slots = (0..placed)
            .map(|i| {
                let row = i / columns;
                let col = i % columns;
                LayoutSlot {
                    x_mm: x0 + col as f32 * (badge_width_mm + COLUMN_GUTTER_MM),
                    y_mm: block_top
                        - (row as f32 + 1.0) * badge_height_mm
                        - row as f32 * ROW_GUTTER_MM,
                }
            })
            .collect();

        Ok(SheetLayout {
            badge_width_mm,
            badge_height_mm,
            columns,
            rows,
            capacity,
            slots,
        })
    }

    /// Badge center points in page coordinates, in slot order. These
    /// feed the layout STL, so they deliberately ignore any PdfOffset.
    pub fn centers(&self) -> Vec<[f32; 2]> {
        self.slots
            .iter()
            .map(|slot| {
                [
                    slot.x_mm + self.badge_width_mm / 2.0,
                    slot.y_mm + self.badge_height_mm / 2.0,
                ]
            })
            .collect()
    }

    /// Registration mark centers: top-center plus two bottom marks a
    /// third of the page width out from the center. Fixed relative to
    /// the page edges, independent of the badge grid and of PdfOffset.
    pub fn registration_marks() -> [[f32; 2]; 3] {
        [
            [PAGE_WIDTH_MM / 2.0, PAGE_HEIGHT_MM - REGISTRATION_EDGE_INSET_MM],
            [
                PAGE_WIDTH_MM / 2.0 - PAGE_WIDTH_MM / 3.0,
                REGISTRATION_EDGE_INSET_MM,
            ],
            [
                PAGE_WIDTH_MM / 2.0 + PAGE_WIDTH_MM / 3.0,
                REGISTRATION_EDGE_INSET_MM,
            ],
        ]
    }
}

fn grid_count(usable: f32, item: f32, gutter: f32) -> usize {
    ((usable + gutter) / (item + gutter)).floor() as usize
}
