// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, fn_: u32 },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f64,
        tube: f64,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        let segments = if fn_ > 0 { fn_ } else { 32 };
        Self::Sphere { r, fn_: segments }
    }

    pub fn torus(radius: f64, tube: f64, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments: radial_segments.max(3),
            tubular_segments: tubular_segments.max(3),
        }
    }

    /// (p, q) torus knot swept with a circular tube
    pub fn torus_knot(
        radius: f64,
        tube: f64,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> Self {
        Self::TorusKnot {
            radius,
            tube,
            tubular_segments: tubular_segments.max(3),
            radial_segments: radial_segments.max(3),
            p: p.max(1),
            q: q.max(1),
        }
    }

    /// Trefoil-like (2, 3) knot of radius 1 and tube 0.3
    pub fn torus_knot_default() -> Self {
        Self::torus_knot(1.0, 0.3, 128, 32, 2, 3)
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, fn_ } => generate_sphere_mesh(*r, *fn_),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => generate_torus_mesh(*radius, *tube, *radial_segments, *tubular_segments),
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => generate_torus_knot_mesh(
                *radius,
                *tube,
                *tubular_segments,
                *radial_segments,
                *p,
                *q,
            ),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let mut mesh = Mesh::new();

    // Calculate cube positions based on center flag
    let (min_x, max_x) = if center {
        (-size.x / 2.0, size.x / 2.0)
    } else {
        (0.0, size.x)
    };
    let (min_y, max_y) = if center {
        (-size.y / 2.0, size.y / 2.0)
    } else {
        (0.0, size.y)
    };
    let (min_z, max_z) = if center {
        (-size.z / 2.0, size.z / 2.0)
    } else {
        (0.0, size.z)
    };

    // 8 vertices of the cube
    let positions = [
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];

    // 6 faces, each with its normal
    let faces = [
        // Front (z+)
        ([4, 5, 6], Vector3::new(0.0, 0.0, 1.0)),
        ([4, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        // Back (z-)
        ([1, 0, 3], Vector3::new(0.0, 0.0, -1.0)),
        ([1, 3, 2], Vector3::new(0.0, 0.0, -1.0)),
        // Right (x+)
        ([5, 1, 2], Vector3::new(1.0, 0.0, 0.0)),
        ([5, 2, 6], Vector3::new(1.0, 0.0, 0.0)),
        // Left (x-)
        ([0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
        ([0, 7, 3], Vector3::new(-1.0, 0.0, 0.0)),
        // Top (y+)
        ([7, 6, 2], Vector3::new(0.0, 1.0, 0.0)),
        ([7, 2, 3], Vector3::new(0.0, 1.0, 0.0)),
        // Bottom (y-)
        ([0, 1, 5], Vector3::new(0.0, -1.0, 0.0)),
        ([0, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
    ];

    for (indices, normal) in faces {
        let v0 = mesh.add_vertex(Vertex::new(positions[indices[0]], normal));
        let v1 = mesh.add_vertex(Vertex::new(positions[indices[1]], normal));
        let v2 = mesh.add_vertex(Vertex::new(positions[indices[2]], normal));
        mesh.add_triangle(Triangle::new([v0, v1, v2]));
    }

    mesh
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let stacks = segments;
    let slices = segments;

    for i in 0..=stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            let x = r * theta.cos();
            let z = r * theta.sin();

            let position = Point3::new(x, y, z);
            let normal = Vector3::new(x, y, z).normalize();
            mesh.add_vertex(Vertex::new(position, normal));
        }
    }

    // Generate triangles
    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;

            mesh.add_triangle(Triangle::new([
                first as usize,
                second as usize,
                (first + 1) as usize,
            ]));
            mesh.add_triangle(Triangle::new([
                second as usize,
                (second + 1) as usize,
                (first + 1) as usize,
            ]));
        }
    }

    mesh
}

/// Grid of `(rows + 1) x (cols + 1)` vertices stitched into quads, two triangles each
fn stitch_grid(mesh: &mut Mesh, rows: u32, cols: u32) {
    let stride = (cols + 1) as usize;
    for j in 1..=rows as usize {
        for i in 1..=cols as usize {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;

            mesh.add_triangle(Triangle::new([a, b, d]));
            mesh.add_triangle(Triangle::new([b, c, d]));
        }
    }
}

fn generate_torus_mesh(radius: f64, tube: f64, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        ((radial_segments + 1) * (tubular_segments + 1)) as usize,
        (radial_segments * tubular_segments * 2) as usize,
    );

    for j in 0..=radial_segments {
        let v = 2.0 * PI * j as f64 / radial_segments as f64;
        for i in 0..=tubular_segments {
            let u = 2.0 * PI * i as f64 / tubular_segments as f64;

            let position = Point3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - center)
                .try_normalize(1e-12)
                .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0));
            mesh.add_vertex(Vertex::new(position, normal));
        }
    }

    stitch_grid(&mut mesh, radial_segments, tubular_segments);
    mesh
}

/// Point on the knot's center curve at parameter `u`
fn torus_knot_curve(u: f64, p: f64, q: f64, radius: f64) -> Point3<f64> {
    let q_over_p = q / p * u;
    let cs = q_over_p.cos();

    Point3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * q_over_p.sin() * 0.5,
    )
}

fn generate_torus_knot_mesh(
    radius: f64,
    tube: f64,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        ((tubular_segments + 1) * (radial_segments + 1)) as usize,
        (tubular_segments * radial_segments * 2) as usize,
    );
    let (p, q) = (p as f64, q as f64);

    for i in 0..=tubular_segments {
        let u = i as f64 / tubular_segments as f64 * p * PI * 2.0;

        // Frenet-like frame from a finite difference along the curve
        let p1 = torus_knot_curve(u, p, q, radius);
        let p2 = torus_knot_curve(u + 0.01, p, q, radius);
        let tangent = p2 - p1;
        let sum = p2.coords + p1.coords;
        let binormal = tangent.cross(&sum).normalize();
        let normal = binormal.cross(&tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f64 / radial_segments as f64 * PI * 2.0;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + normal * cx + binormal * cy;
            let vertex_normal = (position - p1)
                .try_normalize(1e-12)
                .unwrap_or(normal);
            mesh.add_vertex(Vertex::new(position, vertex_normal));
        }
    }

    stitch_grid(&mut mesh, tubular_segments, radial_segments);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh_utils::{is_closed, is_manifold};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_cube_generation() {
        let mesh = generate_cube_mesh(Vector3::new(10.0, 10.0, 10.0), false);
        assert!(mesh.vertex_count() > 0);
        assert!(mesh.triangle_count() > 0);
        assert!(is_manifold(&mesh));
        assert!(is_closed(&mesh));
    }

    #[test]
    fn test_centered_cube_bounds() {
        let mesh = generate_cube_mesh(Vector3::new(1.0, 1.0, 1.0), true);
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(bbox.max, Point3::new(0.5, 0.5, 0.5));
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_torus_dimensions() {
        let mesh = generate_torus_mesh(2.0, 0.5, 16, 48);
        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.max.x, 2.5, epsilon = 1e-9);
        assert_relative_eq!(bbox.max.z, 0.5, epsilon = 1e-2);
        assert_eq!(mesh.triangle_count(), 16 * 48 * 2);
        assert!(is_closed(&mesh));
    }

    #[test]
    fn test_torus_knot_layout() {
        let mesh = Primitive::torus_knot_default().to_mesh();
        assert_eq!(mesh.vertex_count(), 129 * 33);
        assert_eq!(mesh.triangle_count(), 128 * 32 * 2);

        // Center curve z spans [-0.5, 0.5]; the tube adds its radius
        let bbox = mesh.bounding_box();
        assert!(bbox.min.z < 0.0 && bbox.max.z > 0.0);
        assert!(bbox.max.z <= 0.5 + 0.3 + 1e-9);
        assert!(is_manifold(&mesh));
    }
}
