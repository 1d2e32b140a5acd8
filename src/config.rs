//! Chart geometry and palette.
//!
//! Every field has a default, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "canvas": { "width": 1024, "height": 480 }, "palette": { "colors": { "Total": "#222222" } } }
//! ```
use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Margin, Rgb8},
    error::{SceneError, SceneResult},
};

/// Series key to stroke color, with a fallback for unknown series.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub colors: BTreeMap<String, Rgb8>,
    pub fallback: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            ("Total", Rgb8::STEELBLUE),
            ("White", Rgb8::GREEN),
            ("Black", Rgb8::RED),
            ("Native", Rgb8::BLUE),
            ("Asian", Rgb8::ORANGE),
        ]
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect();

        Self {
            colors,
            fallback: Rgb8::GRAY,
        }
    }
}

impl Palette {
    pub fn color_for(&self, key: &str) -> Rgb8 {
        self.colors.get(key).copied().unwrap_or(self.fallback)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer size of the chart, margins included.
    pub canvas: Canvas,
    pub margin: Margin,
    /// Extra height below the plot reserved for the x-axis label.
    pub axis_label_band: f64,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800.0,
                height: 400.0,
            },
            margin: Margin {
                top: 20.0,
                right: 30.0,
                bottom: 40.0,
                left: 40.0,
            },
            axis_label_band: 40.0,
            stroke_width: 1.5,
            marker_radius: 5.0,
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file and validate it.
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read chart config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SceneResult<()> {
        let all = [
            self.canvas.width,
            self.canvas.height,
            self.margin.top,
            self.margin.right,
            self.margin.bottom,
            self.margin.left,
            self.axis_label_band,
            self.stroke_width,
            self.marker_radius,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SceneError::validation(
                "chart dimensions must be finite and non-negative",
            ));
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(SceneError::validation(
                "canvas must be larger than its margins",
            ));
        }
        Ok(())
    }

    pub fn plot_width(&self) -> f64 {
        self.canvas.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.canvas.height - self.margin.top - self.margin.bottom
    }

    /// Height of the emitted SVG element.
    pub fn svg_height(&self) -> f64 {
        self.canvas.height + self.axis_label_band
    }
}
