// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar sectioning of triangle meshes
//!
//! The pipeline runs in three stages: [`extract_segments`] collects the
//! pieces where a plane crosses the triangles of a [`SpatialIndex`],
//! [`ContourReconstructor`] stitches those pieces into ordered 2D outlines,
//! and [`SectionPose`] places the outlines back in world space.

mod contour;
mod extract;
mod hull;
mod intersect;
mod pose;

pub use contour::{edges_to_points, Contour, ContourReconstructor, PointGraph};
pub use extract::{
    bvh_intersect_plane, extract_segments, intersect_plane, BoundsTest, ExtractStats, SpatialIndex,
};
pub use hull::{convex_hull_with_precision, make_convex_hull};
pub use intersect::{
    classify_triangle, plane_intersect_triangle, Segment, TriangleCut, DEFAULT_DEDUP_EPSILON_SQ,
};
pub use pose::SectionPose;

use crate::config::SectionConfig;
use crate::error::SectionError;
use crate::geometry::{Plane, PlaneBasis};
use crate::utils::Precision;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Result of cutting a mesh with one plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub plane: Plane,
    pub basis: PlaneBasis,
    /// Number of raw segments the contours were rebuilt from
    pub segment_count: usize,
    pub contours: Vec<Contour>,
    pub pose: SectionPose,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Sum of contour areas; nested outlines are not subtracted
    pub fn area(&self) -> f64 {
        self.contours.iter().map(Contour::area).sum()
    }

    pub fn perimeter(&self) -> f64 {
        self.contours.iter().map(Contour::perimeter).sum()
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Contour points mapped back onto the cutting plane
    pub fn world_contours(&self) -> Vec<Vec<Point3<f64>>> {
        self.contours
            .iter()
            .map(|contour| {
                contour
                    .points
                    .iter()
                    .map(|p| self.basis.lift(p, &self.plane))
                    .collect()
            })
            .collect()
    }

    /// Convex hull of each contour
    pub fn hulls(&self, precision: Precision) -> Vec<Vec<Point2<f64>>> {
        self.contours
            .iter()
            .map(|contour| convex_hull_with_precision(&contour.points, precision))
            .collect()
    }

    /// Convex hull of every contour point together
    pub fn outline_hull(&self, precision: Precision) -> Vec<Point2<f64>> {
        let points: Vec<Point2<f64>> = self
            .contours
            .iter()
            .flat_map(|contour| contour.points.iter().copied())
            .collect();
        convex_hull_with_precision(&points, precision)
    }
}

/// Cut the triangles of `index` with `plane` and rebuild the outlines
pub fn section_mesh<I: SpatialIndex + ?Sized>(
    index: &I,
    plane: &Plane,
    config: &SectionConfig,
) -> Result<Section, SectionError> {
    section_mesh_with_offset(index, plane, 0.0, config)
}

/// As [`section_mesh`], with the pose pushed `offset` along the plane normal
pub fn section_mesh_with_offset<I: SpatialIndex + ?Sized>(
    index: &I,
    plane: &Plane,
    offset: f64,
    config: &SectionConfig,
) -> Result<Section, SectionError> {
    let reconstructor = config.reconstructor()?;

    let mut segments = Vec::new();
    let stats = extract_segments(index, plane, config.dedup_epsilon_sq, &mut segments);

    let basis = PlaneBasis::from_normal(&plane.normal);
    let contours = reconstructor.reconstruct(&segments, &basis)?;

    Ok(Section {
        plane: *plane,
        basis,
        segment_count: stats.segments,
        contours,
        pose: SectionPose::new(plane, &basis, offset),
    })
}
