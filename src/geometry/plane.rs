// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cutting planes and their in-plane coordinate frames

use crate::error::SectionError;
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Plane in Hessian normal form: `normal · p + constant = 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub constant: f64,
}

impl Plane {
    /// Create a plane, normalizing the normal and rescaling the constant to match
    pub fn new(normal: Vector3<f64>, constant: f64) -> Result<Self, SectionError> {
        let length = normal.norm();
        if !length.is_finite() || length <= f64::EPSILON {
            return Err(SectionError::InvalidPlane {
                normal: [normal.x, normal.y, normal.z],
            });
        }

        Ok(Self {
            normal: normal / length,
            constant: constant / length,
        })
    }

    /// Plane with the given normal passing through `point`
    pub fn from_normal_and_point(
        normal: Vector3<f64>,
        point: &Point3<f64>,
    ) -> Result<Self, SectionError> {
        let plane = Self::new(normal, 0.0)?;
        Ok(Self {
            constant: -plane.normal.dot(&point.coords),
            ..plane
        })
    }

    /// Signed distance from the plane; positive on the side the normal points to
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.constant
    }

    /// Closest point on the plane to the origin
    pub fn coplanar_point(&self) -> Point3<f64> {
        Point3::from(self.normal * -self.constant)
    }

    /// Same orientation, shifted by `offset` along the normal
    pub fn translated(&self, offset: f64) -> Self {
        Self {
            normal: self.normal,
            constant: self.constant - offset,
        }
    }

    /// Whether the normal has unit length within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.normal.norm() - 1.0).abs() <= tolerance
    }
}

/// Orthonormal `(u, v)` frame spanning a plane, plus its normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBasis {
    pub u: Vector3<f64>,
    pub v: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl PlaneBasis {
    /// Derive the frame from a normal: `u = X × n`, or `Y × n` when the
    /// normal is parallel to X, then `v = n × u`.
    ///
    /// Every consumer that needs to agree on the orientation of a section
    /// (contour extraction and placement) must go through this function.
    pub fn from_normal(normal: &Vector3<f64>) -> Self {
        let u = Vector3::x()
            .cross(normal)
            .try_normalize(1e-12)
            .or_else(|| Vector3::y().cross(normal).try_normalize(1e-12))
            .unwrap_or_else(Vector3::zeros);
        let v = normal.cross(&u).try_normalize(1e-12).unwrap_or_else(Vector3::zeros);

        Self {
            u,
            v,
            normal: *normal,
        }
    }

    /// Use caller-supplied axes as-is
    pub fn with_axes(normal: Vector3<f64>, u: Vector3<f64>, v: Vector3<f64>) -> Self {
        Self { u, v, normal }
    }

    /// In-plane coordinates of a world point
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::new(point.coords.dot(&self.u), point.coords.dot(&self.v))
    }

    /// World position of in-plane coordinates on `plane`
    pub fn lift(&self, point: &Point2<f64>, plane: &Plane) -> Point3<f64> {
        Point3::from(self.u * point.x + self.v * point.y - self.normal * plane.constant)
    }
}
