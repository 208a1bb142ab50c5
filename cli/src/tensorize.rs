use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Deserialize;
use structopt::StructOpt;

use abstutil::Timer;
use geom::{Angle, Distance, Pose, Pt3D};
use lane_tensor::{EgoFrame, TensorConfig, TrafficLightRecognition};
use map_model::{LaneID, StaticMap, TrafficLightID};

#[derive(StructOpt)]
pub struct Args {
    /// The path to a map, either built or raw
    #[structopt(long)]
    map: String,
    /// The path to one planning cycle's inputs: `{ego: {x, y, z, yaw}, traffic_lights: {id:
    /// code}, route: [lane ids]}`
    #[structopt(long)]
    frame: String,
    /// A JSON TensorConfig. Flags below override it.
    #[structopt(long)]
    config: Option<String>,
    /// Lanes are kept within this many meters of the ego (before the margin)
    #[structopt(long)]
    mask_range: Option<f64>,
    #[structopt(long)]
    num_lanes: Option<usize>,
    #[structopt(long)]
    num_route_lanes: Option<usize>,
    /// Where to write the tensors
    #[structopt(long)]
    output: String,
}

/// One snapshot of everything that changes between cycles.
#[derive(Deserialize)]
struct Frame {
    ego: EgoState,
    #[serde(default)]
    traffic_lights: BTreeMap<i64, u8>,
    #[serde(default)]
    route: Vec<i64>,
}

#[derive(Deserialize)]
struct EgoState {
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
    /// Radians, counter-clockwise from +x
    yaw: f64,
}

impl Args {
    pub fn run(self) -> Result<()> {
        let mut timer = Timer::new("tensorize one frame");
        let config = self.config()?;
        let map = load_map(&self.map, &mut timer)?;

        let frame: Frame = abstutil::read_json(&self.frame)?;
        let ego = EgoFrame::new(Pose::new(
            Pt3D::new(frame.ego.x, frame.ego.y, frame.ego.z),
            Angle::new_rads(frame.ego.yaw),
        ));
        let recognition: TrafficLightRecognition = frame
            .traffic_lights
            .into_iter()
            .map(|(id, code)| (TrafficLightID(id), code))
            .collect();
        let route: Vec<LaneID> = frame.route.into_iter().map(LaneID).collect();

        timer.start("tensorize");
        let tensors = lane_tensor::tensorize(&map, &ego, &recognition, &route, &config)?;
        timer.stop("tensorize");

        timer.note(format!(
            "Packed {} of {} lanes in range, {} of {} route lanes",
            tensors.lanes.num_filled(),
            tensors.diagnostics.lanes_in_range,
            tensors.route_lanes.num_filled(),
            tensors.diagnostics.route_lanes_in_range
        ));
        for (id, count) in tensors.diagnostics.ambiguous_traffic_lights.borrow() {
            timer.warn(format!("{} has {} traffic lights", id, count));
        }
        for id in &tensors.diagnostics.unknown_route_lanes {
            timer.warn(format!("Route lane {} isn't in the map", id));
        }
        abstutil::write_json(&self.output, &tensors)
    }

    fn config(&self) -> Result<TensorConfig> {
        let mut config = match self.config {
            Some(ref path) => TensorConfig::load(path)?,
            None => TensorConfig::default(),
        };
        if let Some(meters) = self.mask_range {
            if !meters.is_finite() {
                bail!("--mask-range must be finite, not {}", meters);
            }
            config.mask_range = Distance::meters(meters);
        }
        if let Some(n) = self.num_lanes {
            config.num_lanes = n;
        }
        if let Some(n) = self.num_route_lanes {
            config.num_route_lanes = n;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Built maps load directly; anything else is treated as raw and built on the fly.
fn load_map(path: &str, timer: &mut Timer) -> Result<StaticMap> {
    match StaticMap::load_built(path) {
        Ok(map) => Ok(map),
        Err(built_err) => {
            debug!("{} isn't a built map ({:#}); trying it as raw", path, built_err);
            match StaticMap::load_raw(path, timer) {
                Ok(map) => Ok(map),
                Err(raw_err) => bail!(
                    "{} is neither a built map ({:#}) nor a raw one ({:#})",
                    path,
                    built_err,
                    raw_err
                ),
            }
        }
    }
}
