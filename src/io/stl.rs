// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL import and export

use crate::geometry::{Mesh, Triangle, Vertex};
use anyhow::{bail, Context, Result};
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

/// Load an STL file (ASCII or binary) into an indexed mesh
pub fn import_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open STL file: {}", path.display()))?;

    let mesh = read_stl_from(&mut file)
        .with_context(|| format!("Failed to read STL file: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Imported STL"
    );
    Ok(mesh)
}

/// Read STL data from any seekable source.
///
/// stl_io merges identical corner positions, so the resulting mesh shares
/// vertices between faces. Vertex normals are recomputed from geometry.
pub fn read_stl_from<R: Read + Seek>(reader: &mut R) -> Result<Mesh> {
    let stl = stl_io::read_stl(reader).context("Invalid STL data")?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for v in &stl.vertices {
        mesh.add_vertex(Vertex::new(
            Point3::new(v[0] as f64, v[1] as f64, v[2] as f64),
            Vector3::zeros(),
        ));
    }

    for face in &stl.faces {
        if face.vertices.iter().any(|&i| i >= mesh.vertex_count()) {
            bail!("STL face references missing vertex: {:?}", face.vertices);
        }
        mesh.add_triangle(Triangle::new(face.vertices));
    }

    mesh.recompute_normals();
    Ok(mesh)
}

/// Export mesh to binary STL
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_stl_to(mesh, &mut writer)?;
    writer.flush().context("Failed to flush STL file")?;
    Ok(())
}

/// Write binary STL to any sink, with face normals taken from the winding order
pub fn write_stl_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    let to_stl = |p: &Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let normal = tri.face_normal(mesh);
            let [a, b, c] = mesh.triangle_positions(tri);

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [to_stl(&a), to_stl(&b), to_stl(&c)],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter()).context("Failed to write STL data")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    #[test]
    fn test_stl_roundtrip_in_memory() -> Result<()> {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_mesh();

        let mut buffer = Cursor::new(Vec::new());
        write_stl_to(&mesh, &mut buffer)?;
        buffer.set_position(0);
        let loaded = read_stl_from(&mut buffer)?;

        assert_eq!(loaded.triangle_count(), 12);
        assert_eq!(loaded.vertex_count(), 8);
        assert!(loaded.bounding_box().approx_eq(&mesh.bounding_box(), 1e-6));
        Ok(())
    }

    #[test]
    fn test_export_and_import_file() -> Result<()> {
        let mesh = Primitive::torus(1.0, 0.25, 24, 12).to_mesh();
        let file = NamedTempFile::new()?;

        export_stl(&mesh, file.path())?;
        let loaded = import_stl(file.path())?;

        assert_eq!(loaded.triangle_count(), mesh.triangle_count());
        Ok(())
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = import_stl("/nonexistent/part.stl").unwrap_err();
        assert!(format!("{:#}", err).contains("part.stl"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let mut data = Cursor::new(b"not an stl file".to_vec());
        assert!(read_stl_from(&mut data).is_err());
    }
}
