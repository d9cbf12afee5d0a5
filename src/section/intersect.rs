// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle-plane intersection
//!
//! A triangle meets a plane in nothing, a single touching point, a segment,
//! or (when every corner lies exactly on the plane) the whole triangle. Only
//! the segment case contributes to a section outline.

use crate::geometry::Plane;
use crate::utils::math::lerp_point;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Squared distance below which two candidate intersection points are the same point
pub const DEFAULT_DEDUP_EPSILON_SQ: f64 = 1e-12;

/// One piece of a plane/mesh intersection outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// How a single triangle meets a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleCut {
    /// Entirely on one side
    Miss,
    /// Meets the plane at one corner only
    Touch(Point3<f64>),
    /// Crosses the plane, or has one edge lying in it
    Segment(Segment),
    /// All three corners lie exactly on the plane
    Coplanar,
}

/// Classify how `triangle` meets `plane`.
///
/// Candidate points come from edges whose endpoints are on strictly opposite
/// sides, followed by corners lying exactly on the plane; candidates closer
/// than `dedup_epsilon_sq` (squared distance) to an earlier one are merged.
pub fn classify_triangle(
    plane: &Plane,
    triangle: &[Point3<f64>; 3],
    dedup_epsilon_sq: f64,
) -> TriangleCut {
    let [a, b, c] = triangle;
    let da = plane.distance_to_point(a);
    let db = plane.distance_to_point(b);
    let dc = plane.distance_to_point(c);

    if (da > 0.0 && db > 0.0 && dc > 0.0) || (da < 0.0 && db < 0.0 && dc < 0.0) {
        return TriangleCut::Miss;
    }

    let mut candidates: Vec<Point3<f64>> = Vec::with_capacity(6);

    for (p, q, dp, dq) in [(a, b, da, db), (b, c, db, dc), (c, a, dc, da)] {
        if dp * dq < 0.0 {
            candidates.push(lerp_point(p, q, dp / (dp - dq)));
        }
    }

    for (p, d) in [(a, da), (b, db), (c, dc)] {
        if d == 0.0 {
            candidates.push(*p);
        }
    }

    let mut unique: Vec<Point3<f64>> = Vec::with_capacity(candidates.len());
    for point in candidates {
        let duplicate = unique
            .iter()
            .any(|u| (*u - point).norm_squared() < dedup_epsilon_sq);
        if !duplicate {
            unique.push(point);
        }
    }

    match unique.as_slice() {
        [] => TriangleCut::Miss,
        [point] => TriangleCut::Touch(*point),
        [start, end] => TriangleCut::Segment(Segment::new(*start, *end)),
        _ => TriangleCut::Coplanar,
    }
}

/// Intersection segment of a triangle with a plane, if there is exactly one.
///
/// Coplanar triangles yield `None`: their outline is not reported.
pub fn plane_intersect_triangle(plane: &Plane, triangle: &[Point3<f64>; 3]) -> Option<Segment> {
    match classify_triangle(plane, triangle, DEFAULT_DEDUP_EPSILON_SQ) {
        TriangleCut::Segment(segment) => Some(segment),
        _ => None,
    }
}
