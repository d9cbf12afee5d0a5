// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities
//!
//! Edges are identified by the quantized positions of their endpoints rather
//! than by vertex indices, so meshes that duplicate vertices along seams or
//! per face (as most generated and imported meshes do) still count as closed.

use super::Mesh;
use crate::utils::Precision;
use ahash::AHashMap;

/// Undirected edge between two quantized positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: [i64; 3],
    v1: [i64; 3],
}

impl Edge {
    fn new(v0: [i64; 3], v1: [i64; 3]) -> Self {
        // Always store the smaller key first for consistent hashing
        if v0 <= v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

/// Mesh validation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshValidation {
    pub is_manifold: bool,
    pub is_closed: bool,
    pub edge_count: usize,
    pub boundary_edge_count: usize,
    pub degenerate_triangle_count: usize,
}

fn build_edge_counts(mesh: &Mesh, precision: Precision) -> (AHashMap<Edge, u32>, usize) {
    let mut edge_counts: AHashMap<Edge, u32> = AHashMap::new();
    let mut degenerate = 0;

    for corners in mesh.triangle_soup() {
        let [a, b, c] = corners.map(|p| precision.key_3d(&p));
        if a == b || b == c || c == a {
            degenerate += 1;
            continue;
        }

        for edge in [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)] {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    (edge_counts, degenerate)
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    validate_mesh(mesh).is_manifold
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
///
/// Planar sections of a closed mesh are made of closed loops.
pub fn is_closed(mesh: &Mesh) -> bool {
    validate_mesh(mesh).is_closed
}

pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    validate_mesh_with_precision(mesh, Precision::EDGE_POINTS)
}

pub fn validate_mesh_with_precision(mesh: &Mesh, precision: Precision) -> MeshValidation {
    let (edge_counts, degenerate_triangle_count) = build_edge_counts(mesh, precision);

    let boundary_edge_count = edge_counts.values().filter(|&&count| count == 1).count();

    MeshValidation {
        is_manifold: edge_counts.values().all(|&count| count <= 2),
        is_closed: !edge_counts.is_empty() && edge_counts.values().all(|&count| count == 2),
        edge_count: edge_counts.len(),
        boundary_edge_count,
        degenerate_triangle_count,
    }
}
