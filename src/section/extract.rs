// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plane-mesh segment extraction over a spatial index

use super::intersect::{classify_triangle, Segment, TriangleCut, DEFAULT_DEDUP_EPSILON_SQ};
use crate::geometry::{BoundingBox, Mesh, Plane};
use nalgebra::Point3;

/// Outcome of a bounds test during a shapecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsTest {
    /// The shape may touch something inside these bounds; descend
    Intersected,
    /// Nothing inside these bounds can touch the shape; prune
    NotIntersected,
}

/// A triangle container that can be traversed with a pruning predicate.
///
/// `bounds_test` is asked about every volume before its contents are
/// visited. `leaf` receives `(triangle_index, corners)` for each triangle
/// inside a volume that was not pruned, and returns `true` to stop the
/// whole traversal. `shapecast` returns whether it was stopped that way.
pub trait SpatialIndex {
    fn shapecast<B, L>(&self, bounds_test: B, leaf: L) -> bool
    where
        B: FnMut(&BoundingBox) -> BoundsTest,
        L: FnMut(usize, &[Point3<f64>; 3]) -> bool;
}

/// A bare mesh is a single-volume index: one bounds test, then every triangle
impl SpatialIndex for Mesh {
    fn shapecast<B, L>(&self, mut bounds_test: B, mut leaf: L) -> bool
    where
        B: FnMut(&BoundingBox) -> BoundsTest,
        L: FnMut(usize, &[Point3<f64>; 3]) -> bool,
    {
        if self.triangles.is_empty() || bounds_test(&self.bounding_box()) == BoundsTest::NotIntersected {
            return false;
        }

        self.triangle_soup()
            .enumerate()
            .any(|(idx, corners)| leaf(idx, &corners))
    }
}

/// Counters gathered while extracting segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub triangles_tested: usize,
    pub volumes_pruned: usize,
    pub segments: usize,
    pub touches: usize,
    pub coplanar: usize,
}

/// Append the intersection segments of `plane` with every triangle of `index`.
///
/// Volumes the plane misses are pruned; nothing is merged or deduplicated
/// across triangles here.
pub fn extract_segments<I: SpatialIndex + ?Sized>(
    index: &I,
    plane: &Plane,
    dedup_epsilon_sq: f64,
    out: &mut Vec<Segment>,
) -> ExtractStats {
    let mut stats = ExtractStats::default();
    let mut pruned = 0;

    index.shapecast(
        |bbox| {
            if bbox.intersects_plane(plane) {
                BoundsTest::Intersected
            } else {
                pruned += 1;
                BoundsTest::NotIntersected
            }
        },
        |_, triangle| {
            stats.triangles_tested += 1;
            match classify_triangle(plane, triangle, dedup_epsilon_sq) {
                TriangleCut::Segment(segment) => {
                    stats.segments += 1;
                    out.push(segment);
                }
                TriangleCut::Touch(_) => stats.touches += 1,
                TriangleCut::Coplanar => stats.coplanar += 1,
                TriangleCut::Miss => {}
            }
            false
        },
    );
    stats.volumes_pruned = pruned;

    tracing::debug!(
        tested = stats.triangles_tested,
        pruned = stats.volumes_pruned,
        segments = stats.segments,
        touches = stats.touches,
        coplanar = stats.coplanar,
        "Extracted plane intersection segments"
    );
    if stats.coplanar > 0 {
        tracing::debug!(
            count = stats.coplanar,
            "Skipped triangles lying in the cutting plane"
        );
    }

    stats
}

/// Append-form extraction with default tolerances; returns `out` for chaining
pub fn bvh_intersect_plane<'a, I: SpatialIndex + ?Sized>(
    index: &I,
    plane: &Plane,
    out: &'a mut Vec<Segment>,
) -> &'a mut Vec<Segment> {
    extract_segments(index, plane, DEFAULT_DEDUP_EPSILON_SQ, out);
    out
}

/// All intersection segments of `plane` with the triangles of `index`
pub fn intersect_plane<I: SpatialIndex + ?Sized>(index: &I, plane: &Plane) -> Vec<Segment> {
    let mut out = Vec::new();
    extract_segments(index, plane, DEFAULT_DEDUP_EPSILON_SQ, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bvh, Primitive};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_cube_section_segments() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true).to_mesh();
        let bvh = Bvh::from_mesh(&mesh);
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0).unwrap();

        let segments = intersect_plane(&bvh, &plane);
        // Two triangles on each of the four side faces
        assert_eq!(segments.len(), 8);
        for segment in &segments {
            assert_relative_eq!(segment.start.y, 0.0, epsilon = 1e-12);
            assert_relative_eq!(segment.end.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_append_form_keeps_existing_segments() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true).to_mesh();
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.25).unwrap();

        let marker = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let mut out = vec![marker];
        let len = bvh_intersect_plane(&mesh, &plane, &mut out).len();

        assert_eq!(len, 9);
        assert_eq!(out[0], marker);
    }

    #[test]
    fn test_plane_outside_mesh_visits_nothing() {
        let mesh = Primitive::sphere(1.0, 16).to_mesh();
        let bvh = Bvh::from_mesh(&mesh);
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), -5.0).unwrap();

        let mut out = Vec::new();
        let stats = extract_segments(&bvh, &plane, DEFAULT_DEDUP_EPSILON_SQ, &mut out);
        assert_eq!(stats.triangles_tested, 0);
        assert_eq!(stats.volumes_pruned, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_bvh_and_linear_index_agree() {
        let mesh = Primitive::torus_knot_default().to_mesh();
        let bvh = Bvh::from_mesh(&mesh);
        let plane = Plane::new(Vector3::new(-1.0, -1.0, -1.0), 0.1).unwrap();

        let mut from_bvh = Vec::new();
        let bvh_stats = extract_segments(&bvh, &plane, DEFAULT_DEDUP_EPSILON_SQ, &mut from_bvh);
        let mut from_mesh = Vec::new();
        let mesh_stats = extract_segments(&mesh, &plane, DEFAULT_DEDUP_EPSILON_SQ, &mut from_mesh);

        assert_eq!(bvh_stats.segments, mesh_stats.segments);
        assert!(bvh_stats.triangles_tested < mesh_stats.triangles_tested);

        let key = |s: &Segment| {
            [s.start.x, s.start.y, s.start.z, s.end.x, s.end.y, s.end.z].map(f64::to_bits)
        };
        let mut a: Vec<_> = from_bvh.iter().map(key).collect();
        let mut b: Vec<_> = from_mesh.iter().map(key).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
