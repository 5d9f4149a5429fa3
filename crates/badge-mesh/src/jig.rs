//! Registration jig and badge layout meshes.
//!
//! Positions arrive in page coordinates (mm, origin at the sheet's
//! lower-left corner, the same frame the PDF uses) and are re-centered
//! on the page middle, because slicers place meshes relative to the
//! center of the print bed. The conversion is the single place where
//! paper space meets bed space; PDF marks and jig features therefore
//! line up by construction.

use crate::mesh::TriMesh;
use crate::shape::{cylinder_mesh, l_stop_mesh};
use crate::{MeshError, Result};

/// Registration knob: a short cylinder the acetate's printed mark sits over.
pub const KNOB_DIAMETER_MM: f32 = 4.5;
pub const KNOB_HEIGHT_MM: f32 = 2.0;

/// L-shaped acetate stop dimensions.
pub const STOP_ARM_LENGTH_MM: f32 = 20.0;
pub const STOP_ARM_WIDTH_MM: f32 = 5.0;
pub const STOP_HEIGHT_MM: f32 = 2.0;

fn to_bed(point: [f32; 2], page_width: f32, page_height: f32) -> [f32; 2] {
    [point[0] - page_width / 2.0, point[1] - page_height / 2.0]
}

/// Knob-style jig: one cylinder at every registration-mark position, so
/// the jig features sit exactly under the ink marks on the sheet.
pub fn registration_knobs(marks: &[[f32; 2]], page_width: f32, page_height: f32) -> TriMesh {
    let knob = cylinder_mesh(KNOB_DIAMETER_MM / 2.0, KNOB_HEIGHT_MM);
    let mut jig = TriMesh::default();
    for &mark in marks {
        let [x, y] = to_bed(mark, page_width, page_height);
        jig.merge(&knob.translated(x, y, 0.0));
    }
    jig
}

/// Stop-style jig: L-shaped stops hugging the sheet's top corners from
/// the outside (the acetate butts against their inner edges) plus a
/// knob tangent to the bottom edge, also from the outside.
pub fn corner_stops(page_width: f32, page_height: f32) -> TriMesh {
    let stop = l_stop_mesh(STOP_ARM_LENGTH_MM, STOP_ARM_WIDTH_MM, STOP_HEIGHT_MM);

    // Inner corner of each stop coincides with a page corner.
    let top_left = stop.translated(
        -STOP_ARM_WIDTH_MM,
        page_height + STOP_ARM_WIDTH_MM - STOP_ARM_LENGTH_MM,
        0.0,
    );
    let top_right = stop.mirrored_x().translated(
        page_width + STOP_ARM_WIDTH_MM,
        page_height + STOP_ARM_WIDTH_MM - STOP_ARM_LENGTH_MM,
        0.0,
    );

    let mut jig = TriMesh::default();
    jig.merge(&top_left);
    jig.merge(&top_right);

    let knob = cylinder_mesh(KNOB_DIAMETER_MM / 2.0, KNOB_HEIGHT_MM).translated(
        page_width / 2.0,
        -KNOB_DIAMETER_MM / 2.0,
        0.0,
    );
    jig.merge(&knob);

    let [dx, dy] = to_bed([0.0, 0.0], page_width, page_height);
    jig.translated(dx, dy, 0.0)
}

/// One copy of the badge mesh at every badge center from the sheet
/// layout, so the printed badges sit exactly under the acetate.
pub fn badge_layout(
    badge: &TriMesh,
    centers: &[[f32; 2]],
    page_width: f32,
    page_height: f32,
) -> Result<TriMesh> {
    if centers.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    let footprint_center = badge.bounding_box()?.center_xy();

    let mut layout = TriMesh::default();
    for &center in centers {
        let [bx, by] = to_bed(center, page_width, page_height);
        layout.merge(&badge.translated(bx - footprint_center[0], by - footprint_center[1], 0.0));
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::default_badge_mesh;

    const PAGE_W: f32 = 210.0;
    const PAGE_H: f32 = 297.0;

    #[test]
    fn knobs_land_on_bed_centered_marks() {
        let marks = [[105.0, 287.0], [35.0, 10.0], [175.0, 10.0]];
        let jig = registration_knobs(&marks, PAGE_W, PAGE_H);
        let bbox = jig.bounding_box().unwrap();
        // top-center knob: page (105, 287) → bed (0, 138.5)
        assert!((bbox.max[1] - (138.5 + KNOB_DIAMETER_MM / 2.0)).abs() < 0.1);
        // bottom knobs: page y 10 → bed y −138.5
        assert!((bbox.min[1] - (-138.5 - KNOB_DIAMETER_MM / 2.0)).abs() < 0.1);
        assert!((bbox.max[2] - KNOB_HEIGHT_MM).abs() < 1e-4);
    }

    #[test]
    fn corner_stops_sit_outside_the_sheet() {
        let jig = corner_stops(PAGE_W, PAGE_H);
        let bbox = jig.bounding_box().unwrap();
        // stops extend one arm width beyond the sheet on both sides
        assert!((bbox.min[0] - (-PAGE_W / 2.0 - STOP_ARM_WIDTH_MM)).abs() < 0.1);
        assert!((bbox.max[0] - (PAGE_W / 2.0 + STOP_ARM_WIDTH_MM)).abs() < 0.1);
        assert!((bbox.max[1] - (PAGE_H / 2.0 + STOP_ARM_WIDTH_MM)).abs() < 0.1);
        // bottom knob tangent to the sheet's bottom edge
        assert!((bbox.min[1] - (-PAGE_H / 2.0 - KNOB_DIAMETER_MM)).abs() < 0.1);
    }

    #[test]
    fn badge_layout_centers_each_copy() {
        let badge = default_badge_mesh();
        let centers = [[105.0, 148.5]];
        let layout = badge_layout(&badge, &centers, PAGE_W, PAGE_H).unwrap();
        let bbox = layout.bounding_box().unwrap();
        // single badge centered on the bed origin
        assert!((bbox.min[0] + bbox.max[0]).abs() < 1e-3);
        assert!((bbox.min[1] + bbox.max[1]).abs() < 1e-3);
        assert!((bbox.width() - 75.0).abs() < 1e-3);
    }

    #[test]
    fn badge_layout_requires_centers() {
        let badge = default_badge_mesh();
        assert!(badge_layout(&badge, &[], PAGE_W, PAGE_H).is_err());
    }
}
