// Attribute keys and values used by lanelet2 maps. Only the upstream `raw` types carry attribute
// bags; map construction turns these into explicit fields.

pub const TYPE: &str = "type";
pub const SUBTYPE: &str = "subtype";
/// In km/h, as a string.
pub const SPEED_LIMIT: &str = "speed_limit";
/// Only present on lanelets inside an intersection.
pub const TURN_DIRECTION: &str = "turn_direction";

// Values

pub const TRAFFIC_LIGHT: &str = "traffic_light";
pub const CROSSWALK: &str = "crosswalk";
pub const VIRTUAL: &str = "virtual";
pub const ROAD_BORDER: &str = "road_border";
