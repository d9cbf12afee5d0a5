// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding Volume Hierarchy (BVH) for spatial acceleration
//! Used to cull triangles that cannot touch a cutting plane

use super::{BoundingBox, Mesh};
use crate::section::{BoundsTest, SpatialIndex};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Build parameters for [`Bvh`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhOptions {
    /// Nodes with at most this many triangles become leaves
    pub max_leaf_triangles: usize,
    /// Hard recursion limit
    pub max_depth: usize,
}

impl Default for BvhOptions {
    fn default() -> Self {
        Self {
            max_leaf_triangles: 10,
            max_depth: 40,
        }
    }
}

/// BVH node
#[derive(Debug, Clone)]
pub struct BvhNode {
    /// Bounding box of this node
    pub bbox: BoundingBox,
    /// Left child (None for leaf)
    pub left: Option<Box<BvhNode>>,
    /// Right child (None for leaf)
    pub right: Option<Box<BvhNode>>,
    /// Triangle indices (only for leaf nodes)
    pub triangle_indices: Vec<usize>,
}

impl BvhNode {
    fn leaf(bbox: BoundingBox, triangle_indices: Vec<usize>) -> Self {
        Self {
            bbox,
            left: None,
            right: None,
            triangle_indices,
        }
    }

    fn internal(bbox: BoundingBox, left: Box<BvhNode>, right: Box<BvhNode>) -> Self {
        Self {
            bbox,
            left: Some(left),
            right: Some(right),
            triangle_indices: Vec::new(),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.depth());
        let right = self.right.as_ref().map_or(0, |n| n.depth());
        1 + left.max(right)
    }
}

/// Bounding Volume Hierarchy over a triangle mesh.
///
/// Triangles are copied out of the mesh by value, so the hierarchy stays
/// valid after the source mesh is dropped. It must be rebuilt whenever the
/// mesh geometry changes.
#[derive(Debug, Clone)]
pub struct Bvh {
    root: BvhNode,
    triangles: Vec<[Point3<f64>; 3]>,
}

impl Bvh {
    /// Build a BVH from a mesh with default options
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::from_mesh_with_options(mesh, BvhOptions::default())
    }

    pub fn from_mesh_with_options(mesh: &Mesh, options: BvhOptions) -> Self {
        Self::build(mesh.triangle_soup().collect(), options)
    }

    /// Build a BVH from triangle corner positions
    pub fn build(triangles: Vec<[Point3<f64>; 3]>, options: BvhOptions) -> Self {
        if triangles.is_empty() {
            return Self {
                root: BvhNode::leaf(BoundingBox::empty(), Vec::new()),
                triangles,
            };
        }

        let entries: Vec<(usize, BoundingBox)> = triangles
            .iter()
            .enumerate()
            .map(|(idx, tri)| (idx, BoundingBox::from_points(tri)))
            .collect();

        let root = Self::build_recursive(entries, 0, &options);
        Self { root, triangles }
    }

    fn build_recursive(
        mut entries: Vec<(usize, BoundingBox)>,
        depth: usize,
        options: &BvhOptions,
    ) -> BvhNode {
        let bbox = Self::compute_union_bbox(&entries);

        if entries.len() <= options.max_leaf_triangles.max(1) || depth >= options.max_depth {
            let indices = entries.iter().map(|(idx, _)| *idx).collect();
            return BvhNode::leaf(bbox, indices);
        }

        // Sort along the longest axis and split at the median
        let axis = bbox.longest_axis();
        entries.sort_by(|(_, a), (_, b)| a.center()[axis].total_cmp(&b.center()[axis]));

        let right_entries = entries.split_off(entries.len() / 2);
        let left = Box::new(Self::build_recursive(entries, depth + 1, options));
        let right = Box::new(Self::build_recursive(right_entries, depth + 1, options));

        BvhNode::internal(bbox, left, right)
    }

    fn compute_union_bbox(entries: &[(usize, BoundingBox)]) -> BoundingBox {
        entries
            .iter()
            .fold(BoundingBox::empty(), |acc, (_, bbox)| acc.union(bbox))
    }

    /// Bounds of the whole hierarchy
    pub fn bounding_box(&self) -> BoundingBox {
        self.root.bbox
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of levels, counting the root
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    fn shapecast_node<B, L>(&self, node: &BvhNode, bounds_test: &mut B, leaf: &mut L) -> bool
    where
        B: FnMut(&BoundingBox) -> BoundsTest,
        L: FnMut(usize, &[Point3<f64>; 3]) -> bool,
    {
        if bounds_test(&node.bbox) == BoundsTest::NotIntersected {
            return false;
        }

        if node.is_leaf() {
            return node
                .triangle_indices
                .iter()
                .any(|&idx| leaf(idx, &self.triangles[idx]));
        }

        // Left first; stop as soon as a visitor asks to
        if let Some(ref left) = node.left {
            if self.shapecast_node(left, bounds_test, leaf) {
                return true;
            }
        }
        if let Some(ref right) = node.right {
            if self.shapecast_node(right, bounds_test, leaf) {
                return true;
            }
        }
        false
    }
}

impl SpatialIndex for Bvh {
    fn shapecast<B, L>(&self, mut bounds_test: B, mut leaf: L) -> bool
    where
        B: FnMut(&BoundingBox) -> BoundsTest,
        L: FnMut(usize, &[Point3<f64>; 3]) -> bool,
    {
        if self.triangles.is_empty() {
            return false;
        }
        self.shapecast_node(&self.root, &mut bounds_test, &mut leaf)
    }
}
