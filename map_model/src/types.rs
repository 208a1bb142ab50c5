use std::fmt;

use serde::{Deserialize, Serialize};

use geom::PolyLine;

use crate::lanelet;

/// The kinds of lanelets that become lanes. Anything else (walkways, parking, etc) is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LaneKind {
    Road,
    Highway,
    RoadShoulder,
    BicycleLane,
}

impl LaneKind {
    pub fn parse(subtype: &str) -> Option<LaneKind> {
        match subtype {
            "road" => Some(LaneKind::Road),
            "highway" => Some(LaneKind::Highway),
            "road_shoulder" => Some(LaneKind::RoadShoulder),
            "bicycle_lane" => Some(LaneKind::BicycleLane),
            _ => None,
        }
    }
}

/// The painted style of a line separating lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineKind {
    Solid,
    Dashed,
    SolidSolid,
    DashedSolid,
    SolidDashed,
    DashedDashed,
}

impl LineKind {
    pub fn parse(subtype: &str) -> Option<LineKind> {
        match subtype {
            "solid" => Some(LineKind::Solid),
            "dashed" => Some(LineKind::Dashed),
            "solid_solid" => Some(LineKind::SolidSolid),
            "dashed_solid" => Some(LineKind::DashedSolid),
            "solid_dashed" => Some(LineKind::SolidDashed),
            "dashed_dashed" => Some(LineKind::DashedDashed),
            _ => None,
        }
    }
}

/// What a polyline represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolylineType {
    LaneCenter(LaneKind),
    RoadEdge,
    RoadLine(LineKind),
    Crosswalk,
    Unknown,
}

impl PolylineType {
    /// Classifies a linestring from its `type` and `subtype` attributes. Virtual lines (the
    /// invisible edges of lanelets in an intersection) and anything unrecognized are `Unknown`.
    pub fn for_linestring(line_type: &str, line_subtype: &str) -> PolylineType {
        if line_type == lanelet::VIRTUAL && line_subtype.is_empty() {
            return PolylineType::Unknown;
        }
        if PolylineType::is_road_edge_type(line_type) {
            return PolylineType::RoadEdge;
        }
        match LineKind::parse(line_subtype) {
            Some(kind) => PolylineType::RoadLine(kind),
            None => PolylineType::Unknown,
        }
    }

    pub fn is_road_edge_type(line_type: &str) -> bool {
        line_type == lanelet::ROAD_BORDER
    }

    /// Linestrings worth keeping as standalone boundaries, when no lane claims them.
    pub fn is_boundary_linestring(line_type: &str, line_subtype: &str) -> bool {
        PolylineType::is_road_edge_type(line_type) || LineKind::parse(line_subtype).is_some()
    }
}

impl fmt::Display for PolylineType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolylineType::LaneCenter(kind) => write!(f, "lane center ({:?})", kind),
            PolylineType::RoadEdge => write!(f, "road edge"),
            PolylineType::RoadLine(kind) => write!(f, "road line ({:?})", kind),
            PolylineType::Crosswalk => write!(f, "crosswalk"),
            PolylineType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A polyline tagged with what it represents. Inside a built map, the points are always resampled
/// to `POINTS_PER_SEGMENT`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedPolyline {
    pub polyline_type: PolylineType,
    pub pts: PolyLine,
}
