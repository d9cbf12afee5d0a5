// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, planes and spatial indexing

mod bbox;
mod bvh;
mod mesh;
pub mod mesh_utils;
mod plane;
mod primitives;

pub use bbox::BoundingBox;
pub use bvh::{Bvh, BvhNode, BvhOptions};
pub use mesh::{Mesh, Triangle, Vertex};
pub use mesh_utils::{validate_mesh, MeshValidation};
pub use plane::{Plane, PlaneBasis};
pub use primitives::Primitive;
