// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the sectioning core

use thiserror::Error;

/// Recoverable failures raised by the sectioning pipeline.
///
/// Degenerate geometry never produces one of these in the default
/// configuration; it is dropped silently instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SectionError {
    #[error("plane normal {normal:?} cannot be normalized")]
    InvalidPlane { normal: [f64; 3] },

    #[error("contour graph branches at point {point} (degree {degree})")]
    BranchingContour { point: usize, degree: usize },

    #[error("precision of {decimals} decimals is out of range")]
    InvalidPrecision { decimals: u32 },
}
