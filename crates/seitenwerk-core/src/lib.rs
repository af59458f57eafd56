// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk — Core types, errors, and configuration shared across all crates.

pub mod config;
pub mod error;
pub mod files;
pub mod human_errors;
pub mod types;

pub use config::{AppConfig, RendererAssets};
pub use error::SeitenwerkError;
pub use types::*;
