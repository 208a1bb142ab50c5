use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::Distance;

/// Everything that shapes the per-cycle tensors. Every field has a default, so a config file only
/// needs to mention what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorConfig {
    /// Lanes are kept if their centroid is within this distance of the ego, scaled by
    /// `window_margin`, along both axes of the map frame.
    pub mask_range: Distance,
    /// Lets lanes whose centroid is just outside the range, but whose geometry reaches inside,
    /// survive.
    pub window_margin: f64,
    /// Rows in the lane tensor
    pub num_lanes: usize,
    /// Rows in the route-lane tensor
    pub num_route_lanes: usize,
    pub missing_speed_limit: MissingSpeedLimit,
}

/// What to do with a lane that survives cropping but has no speed limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSpeedLimit {
    /// Keep the row, with a zero speed limit and `has_speed_limit = false`.
    Flag,
    /// Abort the whole cycle. For pipelines that guarantee every lane has a resolved speed limit
    /// and want a violation to be loud.
    Reject,
}

impl Default for TensorConfig {
    fn default() -> TensorConfig {
        TensorConfig {
            mask_range: Distance::const_meters(100.0),
            window_margin: 1.1,
            num_lanes: 70,
            num_route_lanes: 25,
            missing_speed_limit: MissingSpeedLimit::Flag,
        }
    }
}

impl TensorConfig {
    pub fn load(path: &str) -> Result<TensorConfig> {
        let config: TensorConfig = abstutil::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mask_range <= Distance::ZERO {
            bail!("mask_range must be positive, not {}", self.mask_range);
        }
        if !self.window_margin.is_finite() || self.window_margin < 1.0 {
            bail!("window_margin must be at least 1, not {}", self.window_margin);
        }
        if !(self.mask_range.inner_meters() * self.window_margin).is_finite() {
            bail!(
                "mask_range {} scaled by window_margin {} overflows",
                self.mask_range,
                self.window_margin
            );
        }
        if self.num_lanes == 0 || self.num_route_lanes == 0 {
            bail!(
                "Tensors need at least one row, not {} lanes and {} route lanes",
                self.num_lanes,
                self.num_route_lanes
            );
        }
        Ok(())
    }

    /// Half the side of the square window around the ego.
    pub fn window_half_width(&self) -> Distance {
        self.mask_range * self.window_margin
    }
}
