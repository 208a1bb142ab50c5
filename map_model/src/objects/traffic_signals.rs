use std::fmt;

use serde::{Deserialize, Serialize};

/// The ID of a traffic-light regulatory element. Per-cycle signal recognition results are keyed by
/// this.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrafficLightID(pub i64);

impl fmt::Display for TrafficLightID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TrafficLight #{}", self.0)
    }
}
