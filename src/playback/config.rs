use std::path::Path;

use anyhow::Context as _;

use crate::color::catalog::PenColor;
use crate::foundation::core::ServoChannel;
use crate::foundation::error::{PlotError, PlotResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Engine-wide settings. Every field has a default, so a partial JSON file is valid.
pub struct EngineConfig {
    /// Distance below which the current waypoint counts as reached.
    pub precision: f64,
    /// Pen mechanism layout and timing.
    pub pencil: PencilConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: 1.0,
            pencil: PencilConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Servo wiring and carousel geometry of the pen mechanism.
pub struct PencilConfig {
    /// Servo raising and lowering the pen.
    pub lift_channel: ServoChannel,
    /// Servo rotating the color carousel.
    pub color_channel: ServoChannel,
    /// Lift angle with the pen off the paper.
    pub up_angle_deg: f64,
    /// Lift angle with the pen on the paper.
    pub down_angle_deg: f64,
    /// Carousel rotation covered by one settle step.
    pub degrees_per_step: f64,
    /// Settle time per carousel step, in milliseconds.
    pub step_time_ms: u64,
    /// Color the carousel is assumed to rest on after a load.
    pub rest_color: PenColor,
}

impl Default for PencilConfig {
    fn default() -> Self {
        Self {
            lift_channel: ServoChannel(1),
            color_channel: ServoChannel(2),
            up_angle_deg: 83.0,
            down_angle_deg: 100.0,
            degrees_per_step: 40.0,
            step_time_ms: 20,
            rest_color: PenColor::Black,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> PlotResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| PlotError::config(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn load_json(path: &Path) -> PlotResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> PlotResult<()> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(PlotError::config("precision must be a positive number"));
        }
        if !(self.pencil.degrees_per_step.is_finite() && self.pencil.degrees_per_step > 0.0) {
            return Err(PlotError::config(
                "pencil.degrees_per_step must be a positive number",
            ));
        }
        if self.pencil.lift_channel == self.pencil.color_channel {
            return Err(PlotError::config(
                "pencil lift and color servos must use different channels",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;
