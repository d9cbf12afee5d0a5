// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for sectionkit

pub mod args;
pub mod reporter;

pub use args::{parse_vector, PrimitiveKind};
pub use reporter::Reporter;
