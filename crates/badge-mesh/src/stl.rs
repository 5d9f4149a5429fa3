//! STL reading and writing, binary and ASCII.
//!
//! Binary STL format:
//! - 80-byte header (arbitrary text)
//! - u32 triangle count (little-endian)
//! - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes

use crate::mesh::{face_normal, TriMesh, Triangle};
use crate::{MeshError, Result};
use std::path::Path;

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

/// Load a mesh from an STL file, auto-detecting binary vs ASCII.
pub fn read_stl_file(path: impl AsRef<Path>) -> Result<TriMesh> {
    let data = std::fs::read(path.as_ref())?;
    read_stl_bytes(&data)
}

/// Parse STL data from memory.
///
/// An ASCII file starts with `solid` and contains at least one `facet`
/// keyword; everything else is treated as binary. The `facet` check
/// matters because binary exporters are allowed to put "solid" in the
/// 80-byte header.
pub fn read_stl_bytes(data: &[u8]) -> Result<TriMesh> {
    if looks_ascii(data) {
        let text = std::str::from_utf8(data)
            .map_err(|_| MeshError::Parse("ASCII STL is not valid UTF-8".to_string()))?;
        parse_ascii(text)
    } else {
        parse_binary(data)
    }
}

fn looks_ascii(data: &[u8]) -> bool {
    let head = &data[..data.len().min(HEADER_LEN)];
    head.starts_with(b"solid")
        && data
            .windows(b"facet".len())
            .any(|window| window == b"facet")
}

fn parse_binary(data: &[u8]) -> Result<TriMesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(MeshError::Parse(
            "binary STL too small for header and triangle count".to_string(),
        ));
    }

    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected = HEADER_LEN + 4 + count * TRIANGLE_LEN;
    if data.len() < expected {
        return Err(MeshError::Parse(format!(
            "binary STL truncated: expected {expected} bytes for {count} triangles, got {}",
            data.len()
        )));
    }
    if count == 0 {
        return Err(MeshError::EmptyMesh);
    }

    let read_f32 = |offset: usize| -> f32 {
        f32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    };
    let read_vec3 = |offset: usize| -> [f32; 3] {
        [read_f32(offset), read_f32(offset + 4), read_f32(offset + 8)]
    };

    let mut triangles = Vec::with_capacity(count);
    let mut offset = HEADER_LEN + 4;
    for _ in 0..count {
        let normal = read_vec3(offset);
        let vertices = [
            read_vec3(offset + 12),
            read_vec3(offset + 24),
            read_vec3(offset + 36),
        ];
        // Some exporters leave the normal zeroed; recompute from winding.
        let normal = if normal.iter().all(|c| c.abs() < 1e-12) {
            face_normal(&vertices)
        } else {
            normal
        };
        triangles.push(Triangle { normal, vertices });
        offset += TRIANGLE_LEN;
    }

    Ok(TriMesh::new(triangles))
}

fn parse_ascii(text: &str) -> Result<TriMesh> {
    let mut triangles = Vec::new();
    let mut vertices: Vec<[f32; 3]> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("vertex") => {
                let mut coord = [0.0f32; 3];
                for slot in &mut coord {
                    let token = tokens.next().ok_or_else(|| {
                        MeshError::Parse(format!("line {}: vertex missing coordinate", line_no + 1))
                    })?;
                    *slot = token.parse().map_err(|_| {
                        MeshError::Parse(format!(
                            "line {}: invalid vertex coordinate '{token}'",
                            line_no + 1
                        ))
                    })?;
                }
                vertices.push(coord);
            }
            Some("endfacet") => {
                if vertices.len() != 3 {
                    return Err(MeshError::Parse(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        vertices.len()
                    )));
                }
                let tri = [vertices[0], vertices[1], vertices[2]];
                triangles.push(Triangle::new(tri));
                vertices.clear();
            }
            _ => {}
        }
    }

    if triangles.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(TriMesh::new(triangles))
}

/// Serialize a mesh as binary STL.
pub fn write_binary_stl(mesh: &TriMesh, name: &str) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let count = mesh.triangle_count();
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + count * TRIANGLE_LEN);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(HEADER_LEN)]);
    buf.resize(HEADER_LEN, 0u8);

    buf.extend_from_slice(&(count as u32).to_le_bytes());

    for tri in &mesh.triangles {
        for c in tri.normal {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in tri.vertices {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}
