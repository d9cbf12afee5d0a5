// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API for repeated sectioning of one mesh

use crate::config::SectionConfig;
use crate::error::SectionError;
use crate::geometry::{validate_mesh, Bvh, Mesh, Plane};
use crate::section::{section_mesh_with_offset, Section};
use crate::utils::Precision;
use anyhow::{bail, Result};
use nalgebra::Vector3;
use rayon::prelude::*;
use std::time::Instant;

/// A mesh with its acceleration structure, ready to be cut by many planes
pub struct SectionKernel {
    mesh: Mesh,
    bvh: Bvh,
    config: SectionConfig,
    hull_precision: Precision,
}

impl SectionKernel {
    /// Build a kernel with default settings
    pub fn new(mesh: Mesh) -> Result<Self> {
        Self::with_config(mesh, SectionConfig::default())
    }

    /// Build a kernel, indexing `mesh` with the BVH options from `config`
    pub fn with_config(mesh: Mesh, config: SectionConfig) -> Result<Self> {
        let invalid = mesh.invalid_triangles();
        if !invalid.is_empty() {
            bail!(
                "Mesh has {} triangles with out-of-range vertex indices (first: {})",
                invalid.len(),
                invalid[0]
            );
        }
        config.reconstructor()?;
        let hull_precision = config.hull_precision()?;

        let start = Instant::now();
        let bvh = Bvh::from_mesh_with_options(&mesh, config.bvh);
        tracing::info!(
            triangles = bvh.triangle_count(),
            depth = bvh.depth(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Built BVH"
        );

        let validation = validate_mesh(&mesh);
        tracing::debug!(
            closed = validation.is_closed,
            manifold = validation.is_manifold,
            boundary_edges = validation.boundary_edge_count,
            "Mesh topology"
        );
        if !validation.is_closed {
            tracing::debug!("Mesh is open; sections may contain open contours");
        }

        Ok(Self {
            mesh,
            bvh,
            config,
            hull_precision,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Key precision for hulls of this kernel's sections
    pub fn hull_precision(&self) -> Precision {
        self.hull_precision
    }

    /// Cut the mesh with `plane`
    pub fn section(&self, plane: &Plane) -> Result<Section, SectionError> {
        self.section_with_offset(plane, 0.0)
    }

    /// Cut the mesh with `plane`, placing the result `offset` along the normal
    pub fn section_with_offset(&self, plane: &Plane, offset: f64) -> Result<Section, SectionError> {
        section_mesh_with_offset(&self.bvh, plane, offset, &self.config)
    }

    /// Cut the mesh with every plane in parallel; results keep the input order
    pub fn section_many(&self, planes: &[Plane]) -> Result<Vec<Section>, SectionError> {
        planes.par_iter().map(|plane| self.section(plane)).collect()
    }

    /// `steps` evenly spaced parallel cuts along `normal`, from offset `from` to `to`.
    ///
    /// Each plane passes through `normal * t` (after normalization), so `t`
    /// is the signed distance of the cut from the origin.
    pub fn sweep(
        &self,
        normal: Vector3<f64>,
        from: f64,
        to: f64,
        steps: usize,
    ) -> Result<Vec<Section>, SectionError> {
        let base = Plane::new(normal, 0.0)?;
        let planes: Vec<Plane> = (0..steps)
            .map(|i| {
                let t = if steps > 1 {
                    from + (to - from) * i as f64 / (steps - 1) as f64
                } else {
                    from
                };
                base.translated(t)
            })
            .collect();

        tracing::debug!(steps, from, to, "Sweeping section planes");
        self.section_many(&planes)
    }
}
