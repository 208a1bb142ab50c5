use anyhow::Result;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use map_model::{LaneID, POINTS_PER_SEGMENT};

use crate::filter::LaneFeatures;
use crate::{validate, MissingSpeedLimit, LANE_CHANNELS};

/// A fixed number of lane rows, nearest first, zero-padded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneTensor {
    /// rows x `POINTS_PER_SEGMENT` x `LANE_CHANNELS`
    pub lanes: Array3<f32>,
    /// rows x 1, in m/s
    pub speed_limit: Array2<f32>,
    /// rows x 1. The only way to tell a zero speed limit from a missing one or a padding row.
    pub has_speed_limit: Array2<bool>,
    /// Which lane fills each row, `None` for padding
    pub lane_ids: Vec<Option<LaneID>>,
}

impl LaneTensor {
    /// A tensor with every row masked.
    pub fn empty(capacity: usize) -> LaneTensor {
        LaneTensor {
            lanes: Array3::zeros((capacity, POINTS_PER_SEGMENT, LANE_CHANNELS)),
            speed_limit: Array2::zeros((capacity, 1)),
            has_speed_limit: Array2::from_elem((capacity, 1), false),
            lane_ids: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.lane_ids.len()
    }

    pub fn num_filled(&self) -> usize {
        self.lane_ids.iter().filter(|id| id.is_some()).count()
    }
}

/// Keeps the `capacity` lanes whose first centerline point is closest to the ego. Ties keep the
/// order of `features`.
pub fn pack_lanes(
    mut features: Vec<LaneFeatures>,
    capacity: usize,
    policy: MissingSpeedLimit,
) -> Result<LaneTensor> {
    features.sort_by_key(|f| f.entry_distance);
    features.truncate(capacity);

    let mut tensor = LaneTensor::empty(capacity);
    for (row, lane) in features.into_iter().enumerate() {
        if lane.points.len() != POINTS_PER_SEGMENT {
            bail!(
                "{} has {} points, not {}",
                lane.id,
                lane.points.len(),
                POINTS_PER_SEGMENT
            );
        }
        for (idx, point) in lane.points.iter().enumerate() {
            for (channel, value) in point.iter().enumerate() {
                tensor.lanes[[row, idx, channel]] = *value;
            }
        }

        match (lane.speed_limit, policy) {
            (Some(speed), _) => {
                tensor.speed_limit[[row, 0]] = speed.inner_meters_per_second() as f32;
                tensor.has_speed_limit[[row, 0]] = true;
            }
            (None, MissingSpeedLimit::Flag) => {}
            (None, MissingSpeedLimit::Reject) => {
                bail!("{} reached packing without a speed limit", lane.id);
            }
        }
        tensor.lane_ids[row] = Some(lane.id);
    }

    validate::check_masks(&tensor)?;
    Ok(tensor)
}
