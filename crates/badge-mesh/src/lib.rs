pub mod jig;
pub mod mesh;
pub mod shape;
pub mod stl;

pub use jig::{badge_layout, corner_stops, registration_knobs};
pub use mesh::{Aabb, TriMesh, Triangle};
pub use shape::BadgeShape;
pub use stl::{read_stl_bytes, read_stl_file, write_binary_stl};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("STL parse error: {0}")]
    Parse(String),
    #[error("mesh has no triangles")]
    EmptyMesh,
}

pub type Result<T> = std::result::Result<T, MeshError>;
