// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D convex hull (Andrew's monotone chain)

use crate::utils::{cross_2d, Precision};
use ahash::AHashSet;
use nalgebra::Point2;
use std::cmp::Ordering;

/// Convex hull of `points`, counter-clockwise, without a repeated end point.
///
/// Points are deduplicated by a 6-decimal key first. Fewer than three input
/// points are returned as given, as is a deduplicated set of fewer than
/// three. Collinear points on the boundary are dropped; only the extremes
/// of each edge are kept.
pub fn make_convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    convex_hull_with_precision(points, Precision::HULL_POINTS)
}

pub fn convex_hull_with_precision(points: &[Point2<f64>], precision: Precision) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut seen = AHashSet::with_capacity(points.len());
    let mut unique: Vec<Point2<f64>> = points
        .iter()
        .filter(|p| seen.insert(precision.key_2d(p)))
        .copied()
        .collect();
    if unique.len() < 3 {
        return unique;
    }

    unique.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    let mut lower = build_chain(unique.iter());
    let mut upper = build_chain(unique.iter().rev());

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// One half of the hull: keep only strict left turns
fn build_chain<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Vec<Point2<f64>> {
    let mut chain: Vec<Point2<f64>> = Vec::new();
    for p in points {
        while chain.len() >= 2 && cross_2d(&chain[chain.len() - 2], &chain[chain.len() - 1], p) <= 0.0 {
            chain.pop();
        }
        chain.push(*p);
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    /// Rotate so the lexicographically smallest point comes first
    fn canonical(hull: &[Point2<f64>]) -> Vec<Point2<f64>> {
        let start = hull
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
            .map_or(0, |(i, _)| i);
        let mut rotated = hull.to_vec();
        rotated.rotate_left(start);
        rotated
    }

    #[test]
    fn test_square_corners() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let hull = make_convex_hull(&square);
        assert_eq!(hull, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
    }

    #[test]
    fn test_interior_point_is_ignored() {
        let with_interior = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.0, 1.0)]);
        let hull = make_convex_hull(&with_interior);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2::new(0.5, 0.5)));
    }

    #[test]
    fn test_collinear_boundary_points_are_dropped() {
        let points = pts(&[
            (0.0, 0.0),
            (0.5, 0.0),
            (1.0, 0.0),
            (1.0, 0.5),
            (1.0, 1.0),
            (0.0, 1.0),
        ]);
        let hull = make_convex_hull(&points);
        assert_eq!(hull, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
    }

    #[test]
    fn test_counter_clockwise_winding() {
        let points = pts(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0), (0.3, 0.1)]);
        let hull = make_convex_hull(&points);
        let n = hull.len();
        for i in 0..n {
            assert!(cross_2d(&hull[i], &hull[(i + 1) % n], &hull[(i + 2) % n]) > 0.0);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let two = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(make_convex_hull(&two), two);

        let repeated = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (1.0000000001, 1.0)]);
        assert_eq!(make_convex_hull(&repeated), two);

        assert!(make_convex_hull(&[]).is_empty());
    }

    #[test]
    fn test_all_collinear() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let hull = make_convex_hull(&line);
        assert_eq!(hull, pts(&[(0.0, 0.0), (3.0, 3.0)]));
    }

    #[test]
    fn test_hull_is_order_independent() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut points: Vec<Point2<f64>> = (0..200)
            .map(|_| Point2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)))
            .collect();

        let reference = canonical(&make_convex_hull(&points));
        assert!(reference.len() >= 3);

        for _ in 0..10 {
            points.shuffle(&mut rng);
            assert_eq!(canonical(&make_convex_hull(&points)), reference);
        }
    }
}
