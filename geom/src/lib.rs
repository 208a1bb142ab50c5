//! Geometry primitives shared by the map model and the tensor pipeline. Map-frame and ego-frame
//! coordinates are both in meters; nothing here knows which frame a point lives in.

#[macro_use]
extern crate anyhow;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::distance::Distance;
pub use crate::polyline::PolyLine;
pub use crate::pose::{Pose, Transform};
pub use crate::pt::{Pt2D, Pt3D};
pub use crate::speed::Speed;

mod angle;
mod bounds;
mod distance;
mod polyline;
mod pose;
mod pt;
mod speed;

/// Two points closer than this are treated as the same point when checking resampled endpoints.
pub const EPSILON_DIST: Distance = Distance::const_meters(1e-8);
