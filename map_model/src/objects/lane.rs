use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Pt2D, Pt3D, Speed};

use crate::{BoundarySegment, LaneKind, PolylineType, TrafficLightID, TypedPolyline};

/// A lane is identified by the lanelet it came from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneID(pub i64);

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}", self.0)
    }
}

/// A drivable lane: its centerline, both boundaries, and the relations the planner cares about.
/// All three polylines have exactly `POINTS_PER_SEGMENT` points, in the map frame.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LaneSegment {
    pub id: LaneID,
    pub center: TypedPolyline,
    pub left_boundary: BoundarySegment,
    pub right_boundary: BoundarySegment,

    /// At most one adjacent lane per side; if the routing graph knows of more, only the first is
    /// kept.
    pub left_neighbor: Option<LaneID>,
    pub right_neighbor: Option<LaneID>,

    pub is_intersection: bool,
    /// Absent is different from zero.
    pub speed_limit: Option<Speed>,
    /// Traffic-light regulatory elements governing this lane, in the order the lanelet references
    /// them. Usually zero or one.
    pub traffic_lights: Vec<TrafficLightID>,

    /// The mean of the centerline before fixing the point count. Cheap to test against a window.
    pub centroid: Pt2D,
}

impl LaneSegment {
    pub fn kind(&self) -> Option<LaneKind> {
        match self.center.polyline_type {
            PolylineType::LaneCenter(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn center_pts(&self) -> &Vec<Pt3D> {
        self.center.pts.points()
    }

    pub fn left_pts(&self) -> &Vec<Pt3D> {
        self.left_boundary.polyline.pts.points()
    }

    pub fn right_pts(&self) -> &Vec<Pt3D> {
        self.right_boundary.polyline.pts.points()
    }

    pub fn first_pt(&self) -> Pt3D {
        self.center.pts.first_pt()
    }

    pub fn last_pt(&self) -> Pt3D {
        self.center.pts.last_pt()
    }

    pub fn left_neighbor_ids(&self) -> Vec<LaneID> {
        self.left_neighbor.into_iter().collect()
    }

    pub fn right_neighbor_ids(&self) -> Vec<LaneID> {
        self.right_neighbor.into_iter().collect()
    }

    pub fn has_speed_limit(&self) -> bool {
        self.speed_limit.is_some()
    }
}
