//! The upstream map loader's output: lanelets, linestrings, and regulatory elements, with their
//! geometry already projected into the map frame and the routing graph's left/right relations
//! already resolved. Attributes are still free-form strings here; nothing downstream of map
//! construction looks at them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::Pt3D;

use crate::lanelet;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMap {
    #[serde(default)]
    pub lanelets: Vec<RawLanelet>,
    #[serde(default)]
    pub linestrings: Vec<RawLineString>,
    #[serde(default)]
    pub regulatory_elements: Vec<RawRegulatoryElement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLanelet {
    pub id: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Only meaningful for lanes
    #[serde(default)]
    pub centerline: Vec<Pt3D>,
    /// The outline, only meaningful for crosswalks
    #[serde(default)]
    pub polygon: Vec<Pt3D>,
    /// Linestring IDs
    pub left_bound: Option<i64>,
    pub right_bound: Option<i64>,
    /// From the routing graph. Usually at most one per side.
    #[serde(default)]
    pub left_neighbors: Vec<i64>,
    #[serde(default)]
    pub right_neighbors: Vec<i64>,
    /// Regulatory element IDs, in the order the lanelet references them
    #[serde(default)]
    pub regulatory_elements: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLineString {
    pub id: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub points: Vec<Pt3D>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRegulatoryElement {
    pub id: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl RawMap {
    pub fn blank() -> RawMap {
        RawMap::default()
    }
}

impl RawLanelet {
    pub fn new(id: i64, subtype: &str) -> RawLanelet {
        RawLanelet {
            id,
            attributes: BTreeMap::from([(lanelet::SUBTYPE.to_string(), subtype.to_string())]),
            centerline: Vec::new(),
            polygon: Vec::new(),
            left_bound: None,
            right_bound: None,
            left_neighbors: Vec::new(),
            right_neighbors: Vec::new(),
            regulatory_elements: Vec::new(),
        }
    }

    pub fn subtype(&self) -> &str {
        get_attr(&self.attributes, lanelet::SUBTYPE)
    }
}

impl RawLineString {
    pub fn new(id: i64, line_type: &str, line_subtype: &str, points: Vec<Pt3D>) -> RawLineString {
        let mut attributes = BTreeMap::new();
        if !line_type.is_empty() {
            attributes.insert(lanelet::TYPE.to_string(), line_type.to_string());
        }
        if !line_subtype.is_empty() {
            attributes.insert(lanelet::SUBTYPE.to_string(), line_subtype.to_string());
        }
        RawLineString {
            id,
            attributes,
            points,
        }
    }

    pub fn line_type(&self) -> &str {
        get_attr(&self.attributes, lanelet::TYPE)
    }

    pub fn line_subtype(&self) -> &str {
        get_attr(&self.attributes, lanelet::SUBTYPE)
    }
}

impl RawRegulatoryElement {
    pub fn traffic_light(id: i64) -> RawRegulatoryElement {
        RawRegulatoryElement {
            id,
            attributes: BTreeMap::from([(
                lanelet::SUBTYPE.to_string(),
                lanelet::TRAFFIC_LIGHT.to_string(),
            )]),
        }
    }

    pub fn is_traffic_light(&self) -> bool {
        get_attr(&self.attributes, lanelet::SUBTYPE) == lanelet::TRAFFIC_LIGHT
    }
}

/// A missing attribute reads as the empty string.
fn get_attr<'a>(attributes: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    attributes.get(key).map(|x| x.as_str()).unwrap_or("")
}
