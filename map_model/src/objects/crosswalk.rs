use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TypedPolyline;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrosswalkID(pub i64);

impl fmt::Display for CrosswalkID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Crosswalk #{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkSegment {
    pub id: CrosswalkID,
    /// A closed ring; the first and last points are the same.
    pub polygon: TypedPolyline,
}
