// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Placement of a flat section in world space

use crate::geometry::{Plane, PlaneBasis};
use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Rigid transform taking section-local `(x, y, 0)` to world space.
///
/// Local x and y follow the basis `u` and `v`, local z follows the plane
/// normal, and the origin sits on the plane (optionally pushed along the
/// normal by `offset`, e.g. to avoid z-fighting with the cut surface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPose {
    pub isometry: Isometry3<f64>,
}

impl SectionPose {
    pub fn new(plane: &Plane, basis: &PlaneBasis, offset: f64) -> Self {
        let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
            basis.u,
            basis.v,
            basis.normal,
        ]));
        let origin = basis.normal * (offset - plane.constant);

        Self {
            isometry: Isometry3::from_parts(
                Translation3::from(origin),
                UnitQuaternion::from_rotation_matrix(&rotation),
            ),
        }
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.isometry.rotation
    }

    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.isometry.to_homogeneous()
    }
}
