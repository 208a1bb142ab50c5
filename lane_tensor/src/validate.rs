use anyhow::Result;
use ndarray::{ArrayView1, Axis};

use crate::LaneTensor;

/// A point whose leading 4 channels sum to less than this, in absolute value, is masked.
pub const MASK_EPSILON: f32 = 1e-6;

/// True if this point (one row of channels) reads as absent.
pub fn is_masked(point: ArrayView1<f32>) -> bool {
    point.iter().take(4).map(|x| x.abs()).sum::<f32>() < MASK_EPSILON
}

/// `lane_ids` decides which rows are real. Padding rows must be fully masked with no speed limit,
/// and all of them come after the real rows. A real row may still contain points that read as
/// masked; an ego standing on a lane's endpoint produces one. Returns how many rows are real.
pub fn check_masks(tensor: &LaneTensor) -> Result<usize> {
    let rows = tensor.capacity();
    if tensor.lanes.len_of(Axis(0)) != rows
        || tensor.speed_limit.nrows() != rows
        || tensor.has_speed_limit.nrows() != rows
    {
        bail!(
            "{} lane ids, but {} geometry rows and {}/{} speed limit rows",
            rows,
            tensor.lanes.len_of(Axis(0)),
            tensor.speed_limit.nrows(),
            tensor.has_speed_limit.nrows()
        );
    }
    if tensor.lanes.len_of(Axis(2)) < 4 {
        bail!(
            "Tensor has {} channels; need at least 4",
            tensor.lanes.len_of(Axis(2))
        );
    }

    let num_points = tensor.lanes.len_of(Axis(1));
    let mut filled = 0;
    for (row, entity) in tensor.lanes.outer_iter().enumerate() {
        let masked = entity
            .outer_iter()
            .filter(|point| is_masked(point.view()))
            .count();
        match tensor.lane_ids[row] {
            Some(id) => {
                if filled != row {
                    bail!("Row {} holds {} after padding", row, id);
                }
                filled += 1;
                if masked > 0 {
                    debug!(
                        "Row {} ({}) has {} of {} points at the ego",
                        row, id, masked, num_points
                    );
                }
            }
            None => {
                if masked != num_points {
                    bail!(
                        "Row {} is padding, but {} of {} points have data",
                        row,
                        num_points - masked,
                        num_points
                    );
                }
                if tensor.has_speed_limit[[row, 0]] || tensor.speed_limit[[row, 0]] != 0.0 {
                    bail!("Row {} is padding, but has a speed limit", row);
                }
            }
        }
    }
    Ok(filled)
}
