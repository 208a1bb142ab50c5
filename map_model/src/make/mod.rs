//! One-time construction of a `StaticMap` from upstream primitives.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use abstutil::Timer;
use geom::{PolyLine, Pt3D};

use crate::raw::{RawLineString, RawMap, RawRegulatoryElement};
use crate::{lanelet, LaneKind, MapID, StaticMap, POINTS_PER_SEGMENT, RESAMPLE_SPACING};

mod boundaries;
mod crosswalks;
mod lanes;

/// Lookups into the raw map, shared by every builder.
pub struct RawIndex<'a> {
    pub linestrings: BTreeMap<i64, &'a RawLineString>,
    pub regulatory_elements: BTreeMap<i64, &'a RawRegulatoryElement>,
}

pub fn make_static_map(raw: &RawMap, source_path: &str, timer: &mut Timer) -> StaticMap {
    timer.start("index raw map");
    let mut index = RawIndex {
        linestrings: BTreeMap::new(),
        regulatory_elements: BTreeMap::new(),
    };
    for ls in &raw.linestrings {
        if index.linestrings.insert(ls.id, ls).is_some() {
            timer.warn(format!("Linestring {} appears twice; using the last", ls.id));
        }
    }
    for re in &raw.regulatory_elements {
        if index.regulatory_elements.insert(re.id, re).is_some() {
            timer.warn(format!(
                "Regulatory element {} appears twice; using the last",
                re.id
            ));
        }
    }
    timer.stop("index raw map");

    timer.start("make lanes and crosswalks");
    let mut lanes = BTreeMap::new();
    let mut crosswalks = BTreeMap::new();
    let mut taken_boundaries = BTreeSet::new();
    for ll in &raw.lanelets {
        let subtype = ll.subtype();
        if let Some(kind) = LaneKind::parse(subtype) {
            match lanes::make_lane(ll, kind, &index, timer) {
                Ok(lane) => {
                    taken_boundaries.insert(lane.left_boundary.id);
                    taken_boundaries.insert(lane.right_boundary.id);
                    if lanes.insert(lane.id, lane).is_some() {
                        timer.warn(format!("Lanelet {} appears twice; using the last", ll.id));
                    }
                }
                Err(err) => timer.warn(format!("Skipping lanelet {}: {:#}", ll.id, err)),
            }
        } else if subtype == lanelet::CROSSWALK {
            match crosswalks::make_crosswalk(ll) {
                Ok(crosswalk) => {
                    crosswalks.insert(crosswalk.id, crosswalk);
                }
                Err(err) => timer.warn(format!("Skipping crosswalk {}: {:#}", ll.id, err)),
            }
        } else {
            // Walkways and friends. Walkways in particular use stop lines as boundaries, so
            // they'd pollute the lane data.
            debug!("Skipping lanelet {} with subtype {:?}", ll.id, subtype);
        }
    }
    timer.stop("make lanes and crosswalks");

    timer.start("make orphan boundaries");
    let boundaries = boundaries::make_orphan_boundaries(&raw.linestrings, &taken_boundaries, timer);
    timer.stop("make orphan boundaries");

    let map = StaticMap {
        id: MapID::from_path(source_path),
        name: abstutil::basename(source_path),
        lanes,
        crosswalks,
        boundaries,
    };
    map.describe();
    map
}

/// The two-stage resampling every entity goes through: first to even spacing, then to exactly
/// `POINTS_PER_SEGMENT`. Returns (evenly spaced, fixed count).
fn resample(pts: &[Pt3D]) -> Result<(PolyLine, PolyLine)> {
    let spaced = PolyLine::new(pts.to_vec())?.resample_with_spacing(RESAMPLE_SPACING)?;
    let fixed = spaced.resample_to_count(POINTS_PER_SEGMENT)?;
    Ok((spaced, fixed))
}
