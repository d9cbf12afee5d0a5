// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh import/export and section serialization

mod buffers;
mod json;
mod stl;

pub use buffers::mesh_from_buffers;
pub use json::{export_section_json, section_to_json, SectionReport};
pub use stl::{export_stl, import_stl, read_stl_from, write_stl_to};
