// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen

use crate::geometry::Plane;
use crate::io;
use crate::section::make_convex_hull;
use crate::SectionKernel;
use nalgebra::{Point2, Vector3};
use wasm_bindgen::prelude::*;

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// A mesh indexed for repeated sectioning from JavaScript
#[wasm_bindgen]
pub struct WasmSectioner {
    inner: SectionKernel,
}

#[wasm_bindgen]
impl WasmSectioner {
    /// Build from flat `[x, y, z, ...]` positions and an optional index buffer
    #[wasm_bindgen(constructor)]
    pub fn new(positions: &[f64], indices: Option<Vec<u32>>) -> Result<WasmSectioner, JsValue> {
        let mesh = io::mesh_from_buffers(positions, indices.as_deref())
            .map_err(|e| js_error("Invalid mesh buffers", e))?;
        let inner = SectionKernel::new(mesh).map_err(|e| js_error("Kernel error", e))?;
        Ok(Self { inner })
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.inner.mesh().triangle_count()
    }

    /// Section with plane `n·p + constant = 0`; returns the section as JSON
    pub fn section(
        &self,
        nx: f64,
        ny: f64,
        nz: f64,
        constant: f64,
        offset: f64,
        include_hulls: bool,
    ) -> Result<String, JsValue> {
        let plane =
            Plane::new(Vector3::new(nx, ny, nz), constant).map_err(|e| js_error("Plane error", e))?;
        let section = self
            .inner
            .section_with_offset(&plane, offset)
            .map_err(|e| js_error("Section error", e))?;

        let hull_precision = include_hulls.then(|| self.inner.hull_precision());
        io::section_to_json(&section, hull_precision)
            .map_err(|e| js_error("JSON serialization error", e))
    }

    /// Export the indexed mesh to binary STL
    pub fn to_stl(&self) -> Result<Vec<u8>, JsValue> {
        let mut buffer = Vec::new();
        io::write_stl_to(self.inner.mesh(), &mut buffer)
            .map_err(|e| js_error("STL export error", e))?;
        Ok(buffer)
    }
}

/// Convex hull of flat `[x, y, ...]` points, returned in the same layout
#[wasm_bindgen]
pub fn convex_hull(points: &[f64]) -> Vec<f64> {
    let points: Vec<Point2<f64>> = points
        .chunks_exact(2)
        .map(|p| Point2::new(p[0], p[1]))
        .collect();

    make_convex_hull(&points)
        .iter()
        .flat_map(|p| [p.x, p.y])
        .collect()
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
