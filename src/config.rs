// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sectioning configuration

use crate::geometry::BvhOptions;
use crate::section::{ContourReconstructor, DEFAULT_DEDUP_EPSILON_SQ};
use crate::utils::Precision;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "section.toml";

/// Tolerances and switches for the sectioning pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Decimal places used to merge section edge endpoints
    pub edge_key_decimals: u32,
    /// Decimal places used to merge convex hull input points
    pub hull_key_decimals: u32,
    /// Squared distance below which per-triangle intersection points coincide
    pub dedup_epsilon_sq: f64,
    /// Fail on branching section outlines instead of walking them greedily
    pub strict_branching: bool,
    /// BVH build parameters
    pub bvh: BvhOptions,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            edge_key_decimals: Precision::EDGE_POINTS.decimals(),
            hull_key_decimals: Precision::HULL_POINTS.decimals(),
            dedup_epsilon_sq: DEFAULT_DEDUP_EPSILON_SQ,
            strict_branching: false,
            bvh: BvhOptions::default(),
        }
    }
}

impl SectionConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SectionConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `SECTION_*` overrides from `lookup`
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(decimals) = lookup("SECTION_EDGE_DECIMALS") {
            self.edge_key_decimals = decimals
                .parse()
                .with_context(|| format!("Invalid SECTION_EDGE_DECIMALS: {}", decimals))?;
        }

        if let Some(decimals) = lookup("SECTION_HULL_DECIMALS") {
            self.hull_key_decimals = decimals
                .parse()
                .with_context(|| format!("Invalid SECTION_HULL_DECIMALS: {}", decimals))?;
        }

        if let Some(strict) = lookup("SECTION_STRICT") {
            self.strict_branching = strict
                .parse()
                .with_context(|| format!("Invalid SECTION_STRICT: {}", strict))?;
        }

        if let Some(leaf_size) = lookup("SECTION_BVH_LEAF_SIZE") {
            self.bvh.max_leaf_triangles = leaf_size
                .parse()
                .with_context(|| format!("Invalid SECTION_BVH_LEAF_SIZE: {}", leaf_size))?;
        }

        self.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.edge_precision()?;
        self.hull_precision()?;
        Ok(())
    }

    pub fn edge_precision(&self) -> Result<Precision, crate::SectionError> {
        Precision::new(self.edge_key_decimals)
    }

    pub fn hull_precision(&self) -> Result<Precision, crate::SectionError> {
        Precision::new(self.hull_key_decimals)
    }

    /// Contour reconstruction settings implied by this configuration
    pub fn reconstructor(&self) -> Result<ContourReconstructor, crate::SectionError> {
        Ok(ContourReconstructor::new(self.edge_precision()?).strict(self.strict_branching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = SectionConfig::default();
        assert_eq!(config.edge_key_decimals, 5);
        assert_eq!(config.hull_key_decimals, 6);
        assert_eq!(config.dedup_epsilon_sq, 1e-12);
        assert!(!config.strict_branching);
        assert_eq!(config.reconstructor().unwrap(), ContourReconstructor::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("section.toml");

        let config = SectionConfig {
            edge_key_decimals: 4,
            strict_branching: true,
            ..SectionConfig::default()
        };
        config.save(&path)?;

        assert_eq!(SectionConfig::from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("section.toml");
        std::fs::write(&path, "strict_branching = true\n[bvh]\nmax_leaf_triangles = 4\n")?;

        let config = SectionConfig::from_file(&path)?;
        assert!(config.strict_branching);
        assert_eq!(config.edge_key_decimals, 5);
        assert_eq!(config.bvh.max_leaf_triangles, 4);
        assert_eq!(config.bvh.max_depth, BvhOptions::default().max_depth);
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SECTION_EDGE_DECIMALS", "3"),
            ("SECTION_STRICT", "true"),
            ("SECTION_BVH_LEAF_SIZE", "2"),
        ]
        .into_iter()
        .collect();

        let mut config = SectionConfig::default();
        config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.edge_key_decimals, 3);
        assert_eq!(config.hull_key_decimals, 6);
        assert!(config.strict_branching);
        assert_eq!(config.bvh.max_leaf_triangles, 2);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let mut config = SectionConfig::default();
        assert!(config
            .apply_env_overrides(|key| (key == "SECTION_HULL_DECIMALS").then(|| "99".to_string()))
            .is_err());
        assert!(config
            .apply_env_overrides(|key| (key == "SECTION_EDGE_DECIMALS").then(|| "five".to_string()))
            .is_err());
    }

    #[test]
    fn test_strict_override_must_be_boolean() {
        let strict = |value: &'static str| {
            move |key: &str| (key == "SECTION_STRICT").then(|| value.to_string())
        };

        let mut config = SectionConfig::default();
        assert!(config.apply_env_overrides(strict("1")).is_err());
        assert!(config.apply_env_overrides(strict("yes")).is_err());
        assert!(!config.strict_branching);

        config.apply_env_overrides(strict("true")).unwrap();
        assert!(config.strict_branching);
        config.apply_env_overrides(strict("false")).unwrap();
        assert!(!config.strict_branching);
    }
}
