// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use crate::error::SectionError;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Fixed decimal precision used to build identity keys for nearly-equal points.
///
/// Two coordinates share a key when they round to the same multiple of
/// `10^-decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision {
    decimals: u32,
}

impl Precision {
    /// Largest precision whose scaled coordinates still fit comfortably in an i64
    pub const MAX_DECIMALS: u32 = 12;

    /// Default precision for section edge endpoints
    pub const EDGE_POINTS: Precision = Precision { decimals: 5 };

    /// Default precision for convex hull input points
    pub const HULL_POINTS: Precision = Precision { decimals: 6 };

    pub fn new(decimals: u32) -> Result<Self, SectionError> {
        if decimals > Self::MAX_DECIMALS {
            return Err(SectionError::InvalidPrecision { decimals });
        }
        Ok(Self { decimals })
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Quantize a single coordinate; `-0.0` and `0.0` share a key
    pub fn quantize(&self, value: f64) -> i64 {
        let scaled = (value * self.scale()).round();
        if scaled == 0.0 {
            0
        } else {
            scaled as i64
        }
    }

    pub fn key_3d(&self, point: &Point3<f64>) -> [i64; 3] {
        [
            self.quantize(point.x),
            self.quantize(point.y),
            self.quantize(point.z),
        ]
    }

    pub fn key_2d(&self, point: &Point2<f64>) -> [i64; 2] {
        [self.quantize(point.x), self.quantize(point.y)]
    }
}

/// Z component of `(a - o) × (b - o)`; positive for a counter-clockwise turn
pub fn cross_2d(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Point at parameter `t` along `a -> b`
pub fn lerp_point(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}
