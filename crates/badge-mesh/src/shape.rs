//! 2D badge silhouettes and the prism builders that turn them into
//! printable meshes.

use crate::mesh::{TriMesh, Triangle};
use crate::Result;

/// Default badge blank: a 75 × 30 mm rounded rectangle, 3 mm thick.
pub const DEFAULT_BADGE_WIDTH_MM: f32 = 75.0;
pub const DEFAULT_BADGE_HEIGHT_MM: f32 = 30.0;
pub const DEFAULT_BADGE_THICKNESS_MM: f32 = 3.0;
pub const DEFAULT_CORNER_RADIUS_MM: f32 = 2.0;

/// Arc resolution for rounded corners and cylinders.
const CORNER_SEGMENTS: usize = 8;
const CYLINDER_SEGMENTS: usize = 32;

/// The badge silhouette shared by the PDF renderer and the layout STL:
/// an outline in mm with its bounding-box corner at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeShape {
    /// Counter-clockwise outline, origin at the lower-left bounding corner.
    pub outline: Vec<[f32; 2]>,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl BadgeShape {
    /// Derive the silhouette from a loaded mesh: the convex outline of
    /// the XY projection, normalized to the origin.
    pub fn from_mesh(mesh: &TriMesh) -> Result<Self> {
        let hull = mesh.convex_footprint()?;
        let min_x = hull.iter().map(|p| p[0]).fold(f32::MAX, f32::min);
        let min_y = hull.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
        let max_x = hull.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        let max_y = hull.iter().map(|p| p[1]).fold(f32::MIN, f32::max);

        let outline = hull
            .into_iter()
            .map(|p| [p[0] - min_x, p[1] - min_y])
            .collect();

        Ok(Self {
            outline,
            width_mm: max_x - min_x,
            height_mm: max_y - min_y,
        })
    }
}

impl Default for BadgeShape {
    fn default() -> Self {
        Self {
            outline: rounded_rect_outline(
                DEFAULT_BADGE_WIDTH_MM,
                DEFAULT_BADGE_HEIGHT_MM,
                DEFAULT_CORNER_RADIUS_MM,
            ),
            width_mm: DEFAULT_BADGE_WIDTH_MM,
            height_mm: DEFAULT_BADGE_HEIGHT_MM,
        }
    }
}

/// Counter-clockwise rounded-rectangle outline with its lower-left
/// bounding corner at the origin. A non-positive radius degenerates to
/// a plain rectangle.
pub fn rounded_rect_outline(width: f32, height: f32, radius: f32) -> Vec<[f32; 2]> {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    if r <= 0.0 {
        return vec![[0.0, 0.0], [width, 0.0], [width, height], [0.0, height]];
    }

    // Corner centers in CCW order starting from the bottom-right, with
    // the start angle of each quarter arc.
    let corners = [
        ([width - r, r], -90.0f32),
        ([width - r, height - r], 0.0),
        ([r, height - r], 90.0),
        ([r, r], 180.0),
    ];

    let mut outline = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (center, start_deg) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let angle = (start_deg + 90.0 * step as f32 / CORNER_SEGMENTS as f32).to_radians();
            outline.push([
                center[0] + r * angle.cos(),
                center[1] + r * angle.sin(),
            ]);
        }
    }
    outline
}

/// Counter-clockwise circle outline centered on the origin.
pub fn circle_outline(radius: f32, segments: usize) -> Vec<[f32; 2]> {
    (0..segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

/// Extrude a convex, counter-clockwise outline into a prism from z = 0
/// to z = `thickness`. Caps are fan-triangulated, which is only valid
/// for convex outlines.
pub fn extrude_convex_polygon(outline: &[[f32; 2]], thickness: f32) -> TriMesh {
    let n = outline.len();
    let mut triangles = Vec::with_capacity(4 * n);
    if n < 3 {
        return TriMesh::new(triangles);
    }

    let at = |p: [f32; 2], z: f32| [p[0], p[1], z];

    for i in 1..n - 1 {
        // bottom cap faces −Z, top cap faces +Z
        triangles.push(Triangle::new([
            at(outline[0], 0.0),
            at(outline[i + 1], 0.0),
            at(outline[i], 0.0),
        ]));
        triangles.push(Triangle::new([
            at(outline[0], thickness),
            at(outline[i], thickness),
            at(outline[i + 1], thickness),
        ]));
    }

    for i in 0..n {
        let j = (i + 1) % n;
        let (bi, bj) = (at(outline[i], 0.0), at(outline[j], 0.0));
        let (ti, tj) = (at(outline[i], thickness), at(outline[j], thickness));
        triangles.push(Triangle::new([bi, bj, tj]));
        triangles.push(Triangle::new([bi, tj, ti]));
    }

    TriMesh::new(triangles)
}

/// A rectangular block with one corner at the origin.
pub fn box_mesh(width: f32, depth: f32, height: f32) -> TriMesh {
    extrude_convex_polygon(
        &[[0.0, 0.0], [width, 0.0], [width, depth], [0.0, depth]],
        height,
    )
}

/// A cylinder standing on z = 0, centered on the origin in XY.
pub fn cylinder_mesh(radius: f32, height: f32) -> TriMesh {
    extrude_convex_polygon(&circle_outline(radius, CYLINDER_SEGMENTS), height)
}

/// The built-in badge blank used when no STL is supplied.
pub fn default_badge_mesh() -> TriMesh {
    extrude_convex_polygon(
        &rounded_rect_outline(
            DEFAULT_BADGE_WIDTH_MM,
            DEFAULT_BADGE_HEIGHT_MM,
            DEFAULT_CORNER_RADIUS_MM,
        ),
        DEFAULT_BADGE_THICKNESS_MM,
    )
}

/// An L-shaped acetate stop hugging a top-left corner: one arm running
/// along the top edge, one down the left edge. Built from two
/// overlapping blocks; slicers union them.
pub fn l_stop_mesh(arm_length: f32, arm_width: f32, height: f32) -> TriMesh {
    let mut mesh = box_mesh(arm_width, arm_length, height);
    mesh.merge(&box_mesh(arm_length, arm_width, height).translated(0.0, arm_length - arm_width, 0.0));
    mesh
}
