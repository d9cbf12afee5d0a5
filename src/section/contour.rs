// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Contour reconstruction from an unordered segment soup
//!
//! Segment endpoints are merged by quantized position, joined into an
//! undirected point graph, and each connected chain is walked greedily into
//! an ordered outline in the plane's 2D frame.

use super::intersect::Segment;
use crate::error::SectionError;
use crate::geometry::PlaneBasis;
use crate::utils::Precision;
use ahash::AHashMap;
use nalgebra::{Point2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Ordered outline of one connected piece of a section, in plane coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2<f64>>,
    /// The walk ended next to where it started
    pub closed: bool,
}

impl Contour {
    pub fn new(points: Vec<Point2<f64>>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive when the points wind counter-clockwise
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = &self.points[i];
                let b = &self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Boundary length, including the closing edge back to the first point
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).norm())
            .sum()
    }

    /// Area centroid; falls back to the vertex average for degenerate outlines
    pub fn centroid(&self) -> Point2<f64> {
        let n = self.points.len();
        if n == 0 {
            return Point2::origin();
        }

        let area = self.signed_area();
        if area.abs() > 1e-12 {
            let (mut cx, mut cy) = (0.0, 0.0);
            for i in 0..n {
                let a = &self.points[i];
                let b = &self.points[(i + 1) % n];
                let cross = a.x * b.y - b.x * a.y;
                cx += (a.x + b.x) * cross;
                cy += (a.y + b.y) * cross;
            }
            return Point2::new(cx / (6.0 * area), cy / (6.0 * area));
        }

        let sum = self
            .points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / n as f64)
    }
}

/// Deduplicated segment endpoints and their undirected adjacency
#[derive(Debug, Clone, Default)]
pub struct PointGraph {
    points: Vec<Point2<f64>>,
    adjacency: Vec<Vec<usize>>,
}

impl PointGraph {
    /// Merge endpoints that share a quantized key, keeping the first-seen
    /// projection, and link the endpoints of every non-degenerate segment.
    pub fn build(edges: &[Segment], basis: &PlaneBasis, precision: Precision) -> Self {
        let mut points: Vec<Point2<f64>> = Vec::new();
        let mut index_map: AHashMap<[i64; 3], usize> = AHashMap::with_capacity(edges.len());
        let mut links: Vec<(usize, usize)> = Vec::with_capacity(edges.len());

        for edge in edges {
            let [i, j] = [edge.start, edge.end].map(|p| {
                *index_map.entry(precision.key_3d(&p)).or_insert_with(|| {
                    points.push(basis.project(&p));
                    points.len() - 1
                })
            });
            links.push((i, j));
        }

        let mut adjacency = vec![Vec::new(); points.len()];
        for (i, j) in links {
            if i == j {
                continue;
            }
            adjacency[i].push(j);
            adjacency[j].push(i);
        }

        Self { points, adjacency }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Number of distinct neighbors; repeated links to the same point count once
    pub fn degree(&self, index: usize) -> usize {
        let neighbors = &self.adjacency[index];
        neighbors
            .iter()
            .enumerate()
            .filter(|&(k, n)| !neighbors[..k].contains(n))
            .count()
    }

    /// `(index, degree)` of every point with more than two distinct neighbors
    pub fn branching_points(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.points.len())
            .map(|i| (i, self.degree(i)))
            .filter(|&(_, degree)| degree > 2)
    }

    /// Walk every connected chain greedily.
    ///
    /// Starting points are taken in ascending index order; from each, the
    /// walk repeatedly moves to the first unvisited neighbor in adjacency
    /// order and stops when there is none. Chains shorter than three points
    /// are dropped. Branching points are not revisited, so a graph with
    /// degree > 2 nodes can come out as several open chains.
    pub fn trace(&self) -> Vec<Contour> {
        let mut contours = Vec::new();
        let mut visited = vec![false; self.points.len()];
        let mut dropped = 0usize;

        for start in 0..self.points.len() {
            if visited[start] || self.adjacency[start].is_empty() {
                continue;
            }

            let mut chain = vec![start];
            visited[start] = true;
            let mut current = start;

            while let Some(&next) = self.adjacency[current].iter().find(|&&n| !visited[n]) {
                visited[next] = true;
                chain.push(next);
                current = next;
            }

            if chain.len() >= 3 {
                let closed = self.adjacency[current].contains(&start);
                let points = chain.iter().map(|&i| self.points[i]).collect();
                contours.push(Contour::new(points, closed));
            } else {
                dropped += 1;
            }
        }

        tracing::debug!(
            points = self.points.len(),
            contours = contours.len(),
            dropped,
            "Traced section contours"
        );

        contours
    }
}

/// Configurable contour reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourReconstructor {
    pub precision: Precision,
    /// Fail on branching points instead of walking through them
    pub strict: bool,
}

impl Default for ContourReconstructor {
    fn default() -> Self {
        Self {
            precision: Precision::EDGE_POINTS,
            strict: false,
        }
    }
}

impl ContourReconstructor {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Rebuild contours from `edges` in the frame given by `basis`
    pub fn reconstruct(
        &self,
        edges: &[Segment],
        basis: &PlaneBasis,
    ) -> Result<Vec<Contour>, SectionError> {
        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let graph = PointGraph::build(edges, basis, self.precision);

        if let Some((point, degree)) = graph.branching_points().next() {
            if self.strict {
                return Err(SectionError::BranchingContour { point, degree });
            }
            tracing::warn!(
                point,
                degree,
                "Section outline branches; contours may come out open"
            );
        }

        Ok(graph.trace())
    }
}

/// Rebuild contours from a segment soup.
///
/// `axes` supplies the `(u, v)` frame; when omitted it is derived from
/// `normal` with [`PlaneBasis::from_normal`].
pub fn edges_to_points(
    edges: &[Segment],
    normal: &Vector3<f64>,
    axes: Option<(Vector3<f64>, Vector3<f64>)>,
) -> Vec<Contour> {
    if edges.is_empty() {
        return Vec::new();
    }

    let basis = match axes {
        Some((u, v)) => PlaneBasis::with_axes(*normal, u, v),
        None => PlaneBasis::from_normal(normal),
    };

    PointGraph::build(edges, &basis, Precision::EDGE_POINTS).trace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn seg(a: [f64; 3], b: [f64; 3]) -> Segment {
        Segment::new(Point3::from(a), Point3::from(b))
    }

    fn unit_square_edges() -> Vec<Segment> {
        vec![
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 0.0, 0.0], [1.0, 0.0, 1.0]),
            seg([1.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
            seg([0.0, 0.0, 1.0], [0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn test_square_edges_form_one_contour() {
        let contours = edges_to_points(&unit_square_edges(), &Vector3::y(), None);

        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert_eq!(contour.len(), 4);
        assert!(contour.closed);
        assert_relative_eq!(contour.area(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(contour.perimeter(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shuffled_and_reversed_edges() {
        let mut edges = unit_square_edges();
        edges.swap(0, 2);
        edges[1] = seg([1.0, 0.0, 1.0], [1.0, 0.0, 0.0]);

        let contours = edges_to_points(&edges, &Vector3::y(), None);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert!(contours[0].closed);
    }

    #[test]
    fn test_nearly_equal_endpoints_are_merged() {
        let mut edges = unit_square_edges();
        edges[1].start.x += 2e-7;
        edges[3].end.z -= 3e-7;

        let contours = edges_to_points(&edges, &Vector3::y(), None);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
    }

    #[test]
    fn test_explicit_axes_are_used() {
        let u = Vector3::new(1.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 0.0, 1.0);
        let contours = edges_to_points(&unit_square_edges(), &Vector3::y(), Some((u, v)));

        let points = &contours[0].points;
        assert_eq!(points[0], Point2::new(0.0, 0.0));
        assert_eq!(points[1], Point2::new(1.0, 0.0));
        assert_eq!(points[2], Point2::new(1.0, 1.0));
        assert_eq!(points[3], Point2::new(0.0, 1.0));
        assert!(contours[0].is_ccw());
        assert_relative_eq!(contours[0].centroid(), Point2::new(0.5, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_short_chains_and_self_loops_are_dropped() {
        let edges = vec![
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([5.0, 0.0, 5.0], [5.0, 0.0, 5.000001]),
        ];

        assert!(edges_to_points(&edges, &Vector3::y(), None).is_empty());
        assert!(edges_to_points(&[], &Vector3::y(), None).is_empty());
    }

    #[test]
    fn test_two_loops_in_start_order() {
        let mut edges = unit_square_edges();
        edges.extend([
            seg([3.0, 0.0, 0.0], [4.0, 0.0, 0.0]),
            seg([4.0, 0.0, 0.0], [3.5, 0.0, 1.0]),
            seg([3.5, 0.0, 1.0], [3.0, 0.0, 0.0]),
        ]);

        let contours = edges_to_points(&edges, &Vector3::y(), None);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 4);
        assert_eq!(contours[1].len(), 3);
        assert_relative_eq!(contours[1].area(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_open_polyline() {
        let edges = vec![
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 0.0, 0.0], [2.0, 0.0, 1.0]),
            seg([2.0, 0.0, 1.0], [3.0, 0.0, 1.0]),
        ];

        let contours = edges_to_points(&edges, &Vector3::y(), None);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
        assert!(!contours[0].closed);
    }

    fn figure_eight() -> Vec<Segment> {
        // Two triangles sharing the origin
        vec![
            seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            seg([1.0, 0.0, 0.0], [1.0, 0.0, 1.0]),
            seg([1.0, 0.0, 1.0], [0.0, 0.0, 0.0]),
            seg([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0]),
            seg([-1.0, 0.0, 0.0], [-1.0, 0.0, -1.0]),
            seg([-1.0, 0.0, -1.0], [0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn test_branching_graph_walks_greedily() {
        let contours = ContourReconstructor::default()
            .reconstruct(&figure_eight(), &PlaneBasis::from_normal(&Vector3::y()))
            .unwrap();

        // The first lobe is walked from the shared point; the second lobe
        // is left with only two unvisited points and dropped
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 3);
        assert!(contours[0].closed);
    }

    #[test]
    fn test_strict_mode_rejects_branching() {
        let result = ContourReconstructor::default()
            .strict(true)
            .reconstruct(&figure_eight(), &PlaneBasis::from_normal(&Vector3::y()));

        assert_eq!(
            result,
            Err(SectionError::BranchingContour {
                point: 0,
                degree: 4
            })
        );
    }

    #[test]
    fn test_duplicate_links_are_not_branching() {
        let mut edges = unit_square_edges();
        edges.push(seg([1.0, 0.0, 0.0], [0.0, 0.0, 0.0]));

        let contours = ContourReconstructor::default()
            .strict(true)
            .reconstruct(&edges, &PlaneBasis::from_normal(&Vector3::y()))
            .unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);
    }
}
