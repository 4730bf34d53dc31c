// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer-specific node spaces built on the core graph model.

pub mod redshift;
