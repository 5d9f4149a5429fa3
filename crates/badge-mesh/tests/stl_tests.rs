use badge_mesh::shape::default_badge_mesh;
use badge_mesh::{read_stl_bytes, read_stl_file, write_binary_stl, BadgeShape, MeshError};
use std::io::Write;

#[test]
fn binary_stl_round_trips_the_default_badge() {
    let mesh = default_badge_mesh();
    let bytes = write_binary_stl(&mesh, "badge").unwrap();
    let loaded = read_stl_bytes(&bytes).unwrap();

    assert_eq!(loaded.triangle_count(), mesh.triangle_count());
    let original = mesh.bounding_box().unwrap();
    let round_trip = loaded.bounding_box().unwrap();
    assert_eq!(original, round_trip);
}

#[test]
fn read_stl_file_loads_from_disk() {
    let mesh = default_badge_mesh();
    let bytes = write_binary_stl(&mesh, "badge").unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let loaded = read_stl_file(file.path()).unwrap();
    assert_eq!(loaded.triangle_count(), mesh.triangle_count());
}

#[test]
fn missing_file_is_an_io_error() {
    let result = read_stl_file("definitely/does/not/exist.stl");
    assert!(matches!(result, Err(MeshError::Io(_))));
}

#[test]
fn truncated_binary_stl_is_rejected() {
    let mesh = default_badge_mesh();
    let mut bytes = write_binary_stl(&mesh, "badge").unwrap();
    bytes.truncate(bytes.len() - 25);

    match read_stl_bytes(&bytes) {
        Err(MeshError::Parse(msg)) => assert!(msg.contains("truncated")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn ascii_stl_is_parsed() {
    let text = "\
solid tetra
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 10 0 0
      vertex 0 10 0
    endloop
  endfacet
  facet normal 0 0 -1
    outer loop
      vertex 0 0 5
      vertex 0 10 5
      vertex 10 0 5
    endloop
  endfacet
endsolid tetra
";
    let mesh = read_stl_bytes(text.as_bytes()).unwrap();
    assert_eq!(mesh.triangle_count(), 2);
    let bbox = mesh.bounding_box().unwrap();
    assert_eq!(bbox.max, [10.0, 10.0, 5.0]);
}

#[test]
fn garbage_ascii_stl_is_rejected() {
    let text = "solid broken\n  facet normal 0 0 1\n    vertex 0 zero 0\n  endfacet\n";
    assert!(matches!(
        read_stl_bytes(text.as_bytes()),
        Err(MeshError::Parse(_))
    ));
}

#[test]
fn badge_shape_survives_the_stl_round_trip() {
    let mesh = default_badge_mesh();
    let bytes = write_binary_stl(&mesh, "badge").unwrap();
    let loaded = read_stl_bytes(&bytes).unwrap();

    let shape = BadgeShape::from_mesh(&loaded).unwrap();
    assert!((shape.width_mm - 75.0).abs() < 1e-3);
    assert!((shape.height_mm - 30.0).abs() < 1e-3);
}
