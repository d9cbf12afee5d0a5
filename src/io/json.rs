// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON export of section results

use crate::section::Section;
use crate::utils::Precision;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flattened, consumer-facing view of a [`Section`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub normal: [f64; 3],
    pub constant: f64,
    pub segment_count: usize,
    pub area: f64,
    pub perimeter: f64,
    /// Column-major 4x4 placement matrix
    pub pose: [f64; 16],
    pub contours: Vec<ContourReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourReport {
    pub closed: bool,
    pub points: Vec<[f64; 2]>,
    pub world_points: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hull: Option<Vec<[f64; 2]>>,
}

impl SectionReport {
    /// Hulls are included only when `hull_precision` is given
    pub fn from_section(section: &Section, hull_precision: Option<Precision>) -> Self {
        let world = section.world_contours();
        let hulls = hull_precision.map(|precision| section.hulls(precision));

        let contours = section
            .contours
            .iter()
            .zip(world)
            .enumerate()
            .map(|(i, (contour, world_points))| ContourReport {
                closed: contour.closed,
                points: contour.points.iter().map(|p| [p.x, p.y]).collect(),
                world_points: world_points.iter().map(|p| [p.x, p.y, p.z]).collect(),
                hull: hulls
                    .as_ref()
                    .map(|h| h[i].iter().map(|p| [p.x, p.y]).collect()),
            })
            .collect();

        let mut pose = [0.0; 16];
        pose.copy_from_slice(section.pose.to_matrix().as_slice());

        Self {
            normal: section.plane.normal.into(),
            constant: section.plane.constant,
            segment_count: section.segment_count,
            area: section.area(),
            perimeter: section.perimeter(),
            pose,
            contours,
        }
    }
}

/// Serialize a section to pretty JSON
pub fn section_to_json(section: &Section, hull_precision: Option<Precision>) -> Result<String> {
    serde_json::to_string_pretty(&SectionReport::from_section(section, hull_precision))
        .context("Failed to serialize section")
}

/// Write a section as JSON to `path`
pub fn export_section_json(
    section: &Section,
    path: impl AsRef<Path>,
    hull_precision: Option<Precision>,
) -> Result<()> {
    let path = path.as_ref();
    let json = section_to_json(section, hull_precision)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write section JSON: {}", path.display()))?;
    Ok(())
}
