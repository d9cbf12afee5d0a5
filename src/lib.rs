// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! sectionkit
//!
//! Planar cross-sections of triangle meshes. A cutting plane is intersected
//! with every triangle a BVH cannot rule out, the resulting segment soup is
//! stitched into ordered 2D contours in the plane's own frame, and the
//! contours can be placed back in world space or reduced to convex hulls.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod section;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use config::SectionConfig;
pub use error::SectionError;
pub use geometry::{Bvh, Mesh, Plane, PlaneBasis, Primitive};
pub use io::{export_section_json, export_stl, import_stl, section_to_json};
pub use kernel::SectionKernel;
pub use section::{
    bvh_intersect_plane, edges_to_points, make_convex_hull, section_mesh, Contour, Section,
    SectionPose, Segment, SpatialIndex,
};

/// Section a mesh once with default settings
pub fn section(mesh: &Mesh, plane: &Plane) -> Result<Section, SectionError> {
    section_mesh(&Bvh::from_mesh(mesh), plane, &SectionConfig::default())
}
