//! Turns the static map into fixed-size, ego-centered tensors, once per planning cycle.
//!
//! Each cycle crops the map to a window around the ego, carries the surviving lanes into the ego
//! frame, encodes their traffic-light state, and packs the nearest ones into tensors whose shape
//! never depends on the map. Nothing here mutates the `StaticMap`, so one map can serve any
//! number of cycles.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use abstutil::Counter;
use map_model::{LaneID, StaticMap};

pub use crate::config::{MissingSpeedLimit, TensorConfig};
pub use crate::ego::EgoFrame;
pub use crate::filter::{process_lane, LaneFeatures};
pub use crate::pack::{pack_lanes, LaneTensor};
pub use crate::traffic_light::{SignalColor, TrafficLightEncoding, TrafficLightRecognition};

mod config;
mod ego;
pub mod filter;
pub mod pack;
pub mod traffic_light;
pub mod validate;

#[cfg(test)]
mod fixtures;

/// Per point: centerline xy, heading delta xy, left and right boundary offsets xy, and the
/// traffic-light one-hot.
pub const LANE_CHANNELS: usize = 12;

/// Everything the planner consumes for one cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapTensors {
    pub lanes: LaneTensor,
    pub route_lanes: LaneTensor,
    pub diagnostics: Diagnostics,
}

/// Things that went wrong this cycle, but not badly enough to stop it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Lanes governed by more than one traffic light, by how many lights they have. Only the
    /// first was encoded.
    pub ambiguous_traffic_lights: Counter<LaneID>,
    /// Route lanes that aren't part of the map
    pub unknown_route_lanes: Vec<LaneID>,
    /// Lanes inside the window, before truncating to capacity
    pub lanes_in_range: usize,
    pub route_lanes_in_range: usize,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.ambiguous_traffic_lights.is_empty() && self.unknown_route_lanes.is_empty()
    }
}

/// Runs one planning cycle. `route` lists the lanes the ego plans to follow; those inside the
/// window form their own pool, packed separately from the full set of lanes.
pub fn tensorize(
    map: &StaticMap,
    ego: &EgoFrame,
    recognition: &TrafficLightRecognition,
    route: &[LaneID],
    config: &TensorConfig,
) -> Result<MapTensors> {
    config.validate()?;
    let half_width = config.window_half_width();
    let mut diagnostics = Diagnostics::default();

    let mut in_range: BTreeMap<LaneID, LaneFeatures> = BTreeMap::new();
    for lane in map.all_lanes() {
        if let Some(features) = process_lane(lane, ego, half_width, recognition)? {
            if features.traffic_light.ambiguous {
                warn!(
                    "{} has {} traffic lights; only using {}",
                    lane.id,
                    lane.traffic_lights.len(),
                    lane.traffic_lights[0]
                );
                diagnostics
                    .ambiguous_traffic_lights
                    .add(lane.id, lane.traffic_lights.len());
            }
            in_range.insert(lane.id, features);
        }
    }

    let mut route_features = Vec::new();
    let mut seen = BTreeSet::new();
    for id in route {
        if !seen.insert(*id) {
            continue;
        }
        if map.maybe_get_l(*id).is_none() {
            warn!("Route includes {}, which isn't in map {}", id, map.get_name());
            diagnostics.unknown_route_lanes.push(*id);
            continue;
        }
        if let Some(features) = in_range.get(id) {
            route_features.push(features.clone());
        }
    }

    diagnostics.lanes_in_range = in_range.len();
    diagnostics.route_lanes_in_range = route_features.len();
    debug!(
        "{} of {} lanes and {} of {} route lanes are within {} of {}",
        diagnostics.lanes_in_range,
        map.num_lanes(),
        diagnostics.route_lanes_in_range,
        route.len(),
        half_width,
        ego.center()
    );

    let lanes = pack_lanes(
        in_range.into_values().collect(),
        config.num_lanes,
        config.missing_speed_limit,
    )?;
    let route_lanes = pack_lanes(
        route_features,
        config.num_route_lanes,
        config.missing_speed_limit,
    )?;
    Ok(MapTensors {
        lanes,
        route_lanes,
        diagnostics,
    })
}
