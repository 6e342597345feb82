use crate::core::colormap::Colormap;
use crate::core::grid::Mesh;
use crate::core::surface::C4Limits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("policy_space.cc3_values must not be empty")]
    NoCc3Values,
    #[error(
        "policy_space.cc3_values has {0} entries; the figure holds at most {max}",
        max = crate::figure::layout::PANEL_COUNT
    )]
    TooManyCc3Values(usize),
    #[error("policy_space.min_bound ({min}) must be below max_bound ({max})")]
    InvertedBounds { min: f64, max: f64 },
    #[error("surface.grid_step must be positive, got {0}")]
    GridStep(f64),
    #[error("surface.c4_lower ({lower}) exceeds c4_upper ({upper})")]
    InvertedLimits { lower: f64, upper: f64 },
    #[error("render.width and render.height must be non-zero")]
    EmptyCanvas,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySpaceConfig {
    #[serde(default = "PolicySpaceConfig::default_min_bound")]
    pub min_bound: f64,
    #[serde(default = "PolicySpaceConfig::default_max_bound")]
    pub max_bound: f64,
    #[serde(default = "PolicySpaceConfig::default_cc3_values")]
    pub cc3_values: Vec<f64>,
    /// Baseline one-step policy, marked in the panel whose CC3 matches.
    #[serde(default = "PolicySpaceConfig::default_one_step")]
    pub one_step: f64,
}

impl PolicySpaceConfig {
    fn default_min_bound() -> f64 {
        3.6
    }
    fn default_max_bound() -> f64 {
        8.0
    }
    fn default_cc3_values() -> Vec<f64> {
        vec![3.6, 4.0, 4.4, 4.8, 5.2, 5.6]
    }
    fn default_one_step() -> f64 {
        4.8
    }
}

impl Default for PolicySpaceConfig {
    fn default() -> Self {
        Self {
            min_bound: Self::default_min_bound(),
            max_bound: Self::default_max_bound(),
            cc3_values: Self::default_cc3_values(),
            one_step: Self::default_one_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "SurfaceConfig::default_c4_lower")]
    pub c4_lower: f64,
    #[serde(default = "SurfaceConfig::default_c4_upper")]
    pub c4_upper: f64,
    #[serde(default = "SurfaceConfig::default_grid_step")]
    pub grid_step: f64,
    #[serde(default = "SurfaceConfig::default_margin")]
    pub margin: f64,
}

impl SurfaceConfig {
    fn default_c4_lower() -> f64 {
        0.1
    }
    fn default_c4_upper() -> f64 {
        4.81
    }
    fn default_grid_step() -> f64 {
        0.01
    }
    fn default_margin() -> f64 {
        0.2
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            c4_lower: Self::default_c4_lower(),
            c4_upper: Self::default_c4_upper(),
            grid_step: Self::default_grid_step(),
            margin: Self::default_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_width")]
    pub width: u32,
    #[serde(default = "RenderConfig::default_height")]
    pub height: u32,
    #[serde(default = "RenderConfig::default_font_size")]
    pub font_size: u32,
    #[serde(default = "RenderConfig::default_surface_color_min")]
    pub surface_color_min: f64,
    #[serde(default = "RenderConfig::default_surface_color_max")]
    pub surface_color_max: f64,
    #[serde(default = "RenderConfig::default_surface_colormap")]
    pub surface_colormap: Colormap,
    #[serde(default = "RenderConfig::default_uncertainty_colormap")]
    pub uncertainty_colormap: Colormap,
}

impl RenderConfig {
    fn default_width() -> u32 {
        1600
    }
    fn default_height() -> u32 {
        800
    }
    fn default_font_size() -> u32 {
        14
    }
    fn default_surface_color_min() -> f64 {
        2.5
    }
    fn default_surface_color_max() -> f64 {
        4.8
    }
    fn default_surface_colormap() -> Colormap {
        Colormap::Viridis
    }
    fn default_uncertainty_colormap() -> Colormap {
        Colormap::PlasmaR
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            font_size: Self::default_font_size(),
            surface_color_min: Self::default_surface_color_min(),
            surface_color_max: Self::default_surface_color_max(),
            surface_colormap: Self::default_surface_colormap(),
            uncertainty_colormap: Self::default_uncertainty_colormap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlotConfig {
    #[serde(default)]
    pub policy_space: PolicySpaceConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl PlotConfig {
    pub fn c4_limits(&self) -> C4Limits {
        C4Limits::new(self.surface.c4_lower, self.surface.c4_upper)
    }

    /// Shared axis range for every panel: policy bounds padded by the margin.
    pub fn axis_range(&self) -> (f64, f64) {
        (
            self.policy_space.min_bound - self.surface.margin,
            self.policy_space.max_bound + self.surface.margin,
        )
    }

    pub fn mesh(&self) -> Mesh {
        Mesh::square(
            self.policy_space.min_bound,
            self.policy_space.max_bound,
            self.surface.margin,
            self.surface.grid_step,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ps = &self.policy_space;
        if ps.cc3_values.is_empty() {
            return Err(ConfigError::NoCc3Values);
        }
        if ps.cc3_values.len() > crate::figure::layout::PANEL_COUNT {
            return Err(ConfigError::TooManyCc3Values(ps.cc3_values.len()));
        }
        if ps.min_bound >= ps.max_bound {
            return Err(ConfigError::InvertedBounds {
                min: ps.min_bound,
                max: ps.max_bound,
            });
        }
        if self.surface.grid_step.is_nan() || self.surface.grid_step <= 0.0 {
            return Err(ConfigError::GridStep(self.surface.grid_step));
        }
        if self.surface.c4_lower > self.surface.c4_upper {
            return Err(ConfigError::InvertedLimits {
                lower: self.surface.c4_lower,
                upper: self.surface.c4_upper,
            });
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(ConfigError::EmptyCanvas);
        }
        Ok(())
    }

    /// Read `path`; a missing file is created with the defaults commented out.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        commented.push('\n');
                    } else if trimmed.starts_with('[')
                        && trimmed.ends_with(']')
                        && !line.contains('=')
                    {
                        commented.push_str(line);
                        commented.push('\n');
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                        commented.push('\n');
                    }
                }
                match fs::write(path_obj, commented) {
                    Ok(()) => info!("Wrote default config to {path}"),
                    Err(err) => warn!("Failed to write default config to {path}: {err}"),
                }
            }
            Err(err) => {
                warn!("Failed to serialize default config: {err}; continuing with defaults")
            }
        }
        default_cfg
    }
}
