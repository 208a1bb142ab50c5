//! The static, map-frame representation of an HD map, ready to be cropped and packed into model
//! input every planning cycle.
//!
//! A `StaticMap` is built once from upstream primitives (`raw::RawMap`), by resampling every
//! polyline to a fixed number of points and resolving the relations between lanes, boundaries,
//! and traffic lights into explicit fields. After that it's read-only and can be shared freely.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub use crate::map::{MapID, StaticMap};
pub use crate::objects::boundary::{BoundaryID, BoundarySegment};
pub use crate::objects::crosswalk::{CrosswalkID, CrosswalkSegment};
pub use crate::objects::lane::{LaneID, LaneSegment};
pub use crate::objects::traffic_signals::TrafficLightID;
pub use crate::types::{LaneKind, LineKind, PolylineType, TypedPolyline};

use geom::Distance;

pub mod lanelet;
mod make;
mod map;
mod objects;
pub mod raw;
mod types;

/// Every lane centerline, lane boundary, orphan boundary, and crosswalk is resampled to exactly
/// this many points.
pub const POINTS_PER_SEGMENT: usize = 20;

/// Before fixing the point count, polylines are first resampled at this spacing, which evens out
/// the vertex density of the source data.
pub const RESAMPLE_SPACING: Distance = Distance::const_meters(0.5);
