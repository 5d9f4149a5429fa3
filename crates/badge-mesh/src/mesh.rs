//! Triangle soup mesh with the handful of operations badge layout needs:
//! bounding boxes, translation, mirroring, merging, and the convex
//! footprint of the XY projection.

use crate::{MeshError, Result};

/// One triangle with an outward-facing normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
}

impl Triangle {
    pub fn new(vertices: [[f32; 3]; 3]) -> Self {
        Self {
            normal: face_normal(&vertices),
            vertices,
        }
    }
}

/// Compute the unit face normal from the vertex winding (right-hand rule).
/// Degenerate triangles get +Z.
pub fn face_normal(vertices: &[[f32; 3]; 3]) -> [f32; 3] {
    let [a, b, c] = vertices;
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Axis-aligned bounding box in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn depth(&self) -> f32 {
        self.max[2] - self.min[2]
    }

    /// Center of the footprint (XY only).
    pub fn center_xy(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }
}

/// A triangle mesh in millimeters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub triangles: Vec<Triangle>,
}

impl TriMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn bounding_box(&self) -> Result<Aabb> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        if self.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        for tri in &self.triangles {
            for v in &tri.vertices {
                for axis in 0..3 {
                    min[axis] = min[axis].min(v[axis]);
                    max[axis] = max[axis].max(v[axis]);
                }
            }
        }
        Ok(Aabb { min, max })
    }

    /// A copy of the mesh translated by the given offset.
    pub fn translated(&self, dx: f32, dy: f32, dz: f32) -> TriMesh {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| Triangle {
                normal: tri.normal,
                vertices: tri
                    .vertices
                    .map(|v| [v[0] + dx, v[1] + dy, v[2] + dz]),
            })
            .collect();
        TriMesh { triangles }
    }

    /// A copy mirrored about the YZ plane (x → −x). Vertex winding is
    /// flipped so the triangles stay outward-facing.
    pub fn mirrored_x(&self) -> TriMesh {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.vertices;
                let vertices = [
                    [-a[0], a[1], a[2]],
                    [-c[0], c[1], c[2]],
                    [-b[0], b[1], b[2]],
                ];
                Triangle {
                    normal: [-tri.normal[0], tri.normal[1], tri.normal[2]],
                    vertices,
                }
            })
            .collect();
        TriMesh { triangles }
    }

    /// Append all triangles from another mesh.
    pub fn merge(&mut self, other: &TriMesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Convex outline of the mesh projected onto the XY plane, in
    /// counter-clockwise order. This is the badge silhouette used for
    /// the PDF clip region.
    pub fn convex_footprint(&self) -> Result<Vec<[f32; 2]>> {
        let mut points: Vec<[f32; 2]> = self
            .triangles
            .iter()
            .flat_map(|tri| tri.vertices.iter().map(|v| [v[0], v[1]]))
            .collect();
        if points.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        Ok(convex_hull(&mut points))
    }
}

/// Andrew's monotone chain. Input order is destroyed; output is CCW
/// without the closing point repeated.
fn convex_hull(points: &mut Vec<[f32; 2]>) -> Vec<[f32; 2]> {
    points.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    points.dedup_by(|a, b| (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6);
    if points.len() < 3 {
        return points.clone();
    }

    let cross = |o: [f32; 2], a: [f32; 2], b: [f32; 2]| -> f32 {
        (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
    };

    let mut lower: Vec<[f32; 2]> = Vec::new();
    for &p in points.iter() {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<[f32; 2]> = Vec::new();
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
