// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{CompressionLevel, RasterizeParams};

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base directory holding the page renderer's assets.
    pub renderer_assets: PathBuf,
    /// Rasterize parameters for the `medium` tier.
    pub medium: RasterizeParams,
    /// Rasterize parameters for the `high` tier.
    pub high: RasterizeParams,
    /// Default compression tier when none is given.
    pub default_level: CompressionLevel,
    /// Default chunk target for size-based splitting, in MB.
    pub default_target_mb: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer_assets: PathBuf::from("assets/renderer"),
            medium: RasterizeParams {
                scale: 1.15,
                jpeg_quality: 0.75,
            },
            high: RasterizeParams {
                scale: 0.95,
                jpeg_quality: 0.6,
            },
            default_level: CompressionLevel::Medium,
            default_target_mb: 5.0,
        }
    }
}

impl AppConfig {
    /// Rasterize parameters for a tier, or `None` for the lossless-only tier.
    pub fn rasterize_params(&self, level: CompressionLevel) -> Option<RasterizeParams> {
        match level {
            CompressionLevel::Low => None,
            CompressionLevel::Medium => Some(self.medium),
            CompressionLevel::High => Some(self.high),
        }
    }

    /// Asset layout rooted at [`AppConfig::renderer_assets`].
    pub fn assets(&self) -> RendererAssets {
        RendererAssets::new(&self.renderer_assets)
    }

    /// Load a config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), %err, "ignoring unreadable config");
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                }
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Default config location: `$XDG_CONFIG_HOME/seitenwerk/config.json`, then
/// `~/.config/seitenwerk/config.json`.
pub fn default_config_path() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config")
    } else {
        PathBuf::from(".")
    };
    base.join("seitenwerk").join(CONFIG_FILE)
}

/// Fixed asset layout the page renderer needs.
///
/// Only the rasterize compression strategy depends on these; every other
/// operation works without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererAssets {
    root: PathBuf,
}

impl RendererAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Packed character maps for CJK text.
    pub fn cmap_dir(&self) -> PathBuf {
        self.root.join("cmaps")
    }

    /// ICC colour profiles.
    pub fn icc_dir(&self) -> PathBuf {
        self.root.join("iccs")
    }

    /// The 14 standard PDF fonts.
    pub fn standard_font_dir(&self) -> PathBuf {
        self.root.join("standard_fonts")
    }

    /// Directory holding the renderer's native runtime library.
    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join("runtime")
    }

    /// Asset roots that do not exist on disk.
    pub fn missing(&self) -> Vec<PathBuf> {
        [
            self.cmap_dir(),
            self.icc_dir(),
            self.standard_font_dir(),
            self.runtime_dir(),
        ]
        .into_iter()
        .filter(|path| !path.exists())
        .collect()
    }
}
