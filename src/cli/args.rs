// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Argument types shared by the command-line tools

use crate::geometry::{Mesh, Primitive};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use nalgebra::Vector3;

/// Built-in test meshes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Torus,
    TorusKnot,
}

impl PrimitiveKind {
    /// Generate the mesh at unit scale
    pub fn to_mesh(self) -> Mesh {
        match self {
            Self::Cube => Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true),
            Self::Sphere => Primitive::sphere(1.0, 32),
            Self::Torus => Primitive::torus(1.0, 0.3, 32, 64),
            Self::TorusKnot => Primitive::torus_knot_default(),
        }
        .to_mesh()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::TorusKnot => "torus-knot",
        }
    }
}

/// Parse `"x,y,z"` into a vector
pub fn parse_vector(text: &str) -> Result<Vector3<f64>> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid number {:?} in vector {:?}", s.trim(), text))
        })
        .collect::<Result<_>>()?;

    if parts.len() != 3 {
        bail!("Expected three comma-separated values, got {:?}", text);
    }
    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("0,0,1").unwrap(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(
            parse_vector(" -1.5, 2 ,1e-3").unwrap(),
            Vector3::new(-1.5, 2.0, 0.001)
        );
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("1,2,z").is_err());
    }

    #[test]
    fn test_primitive_meshes_are_nonempty() {
        for kind in PrimitiveKind::value_variants() {
            let mesh = kind.to_mesh();
            assert!(mesh.triangle_count() > 0, "{} is empty", kind.name());
        }
    }
}
