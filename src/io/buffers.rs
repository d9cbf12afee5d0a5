// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat vertex/index buffers as used by GPU-style mesh APIs

use crate::geometry::{Mesh, Triangle, Vertex};
use anyhow::{bail, Result};
use nalgebra::{Point3, Vector3};

/// Build a mesh from `[x, y, z, ...]` positions and an optional triangle index list.
///
/// Without indices every three consecutive positions form a triangle.
pub fn mesh_from_buffers(positions: &[f64], indices: Option<&[u32]>) -> Result<Mesh> {
    if positions.len() % 3 != 0 {
        bail!(
            "Position buffer length {} is not a multiple of 3",
            positions.len()
        );
    }

    let vertex_count = positions.len() / 3;
    let index_list: Vec<usize> = match indices {
        Some(indices) => indices.iter().map(|&i| i as usize).collect(),
        None => (0..vertex_count).collect(),
    };

    if index_list.len() % 3 != 0 {
        bail!(
            "Index buffer length {} is not a multiple of 3",
            index_list.len()
        );
    }
    if let Some(&bad) = index_list.iter().find(|&&i| i >= vertex_count) {
        bail!("Index {} out of range for {} vertices", bad, vertex_count);
    }

    let mut mesh = Mesh::with_capacity(vertex_count, index_list.len() / 3);
    for p in positions.chunks_exact(3) {
        mesh.add_vertex(Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::zeros()));
    }
    for tri in index_list.chunks_exact(3) {
        mesh.add_triangle(Triangle::new([tri[0], tri[1], tri[2]]));
    }

    mesh.recompute_normals();
    Ok(mesh)
}
