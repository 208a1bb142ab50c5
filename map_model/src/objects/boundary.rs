use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PolylineType, TypedPolyline};

/// The ID of the linestring a boundary came from. Adjacent lanes share linestrings, so several
/// lanes may hold a copy of the same boundary.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoundaryID(pub i64);

impl fmt::Display for BoundaryID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Boundary #{}", self.0)
    }
}

/// A road edge or a painted line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub id: BoundaryID,
    pub polyline: TypedPolyline,
}

impl BoundarySegment {
    pub fn boundary_type(&self) -> PolylineType {
        self.polyline.polyline_type
    }
}
