use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use abstutil::{prettyprint_usize, Timer};
use geom::PolyLine;

use crate::raw::RawMap;
use crate::{
    BoundaryID, BoundarySegment, CrosswalkID, CrosswalkSegment, LaneID, LaneSegment,
    POINTS_PER_SEGMENT,
};

/// Identifies a map by where it was loaded from. Derived from an md5 digest of the source path, so
/// it's stable across runs and machines, and always exactly 16 decimal digits when displayed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapID(pub u64);

impl MapID {
    const DIGITS: u32 = 16;

    pub fn from_path(path: &str) -> MapID {
        let digest = md5::compute(path.as_bytes());
        let value = u128::from_be_bytes(digest.0) % 10u128.pow(MapID::DIGITS);
        // The modulus keeps this far below u64::MAX
        MapID(value as u64)
    }
}

impl fmt::Display for MapID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016}", self.0)
    }
}

/// The immutable map. Lanes, crosswalks, and the boundaries that no lane claims are keyed by ID,
/// so iteration order never depends on the order of the source data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticMap {
    pub(crate) id: MapID,
    pub(crate) name: String,
    pub(crate) lanes: BTreeMap<LaneID, LaneSegment>,
    pub(crate) crosswalks: BTreeMap<CrosswalkID, CrosswalkSegment>,
    /// Only boundaries not already part of some lane
    pub(crate) boundaries: BTreeMap<BoundaryID, BoundarySegment>,
}

impl StaticMap {
    /// Builds a map from upstream primitives. `source_path` only feeds the map's ID and name.
    pub fn create_from_raw(raw: &RawMap, source_path: &str, timer: &mut Timer) -> StaticMap {
        crate::make::make_static_map(raw, source_path, timer)
    }

    /// Reads a `RawMap` from a JSON file and builds it.
    pub fn load_raw(path: &str, timer: &mut Timer) -> Result<StaticMap> {
        timer.start(format!("read {}", path));
        let raw: RawMap = abstutil::read_json(path)?;
        timer.stop(format!("read {}", path));
        Ok(StaticMap::create_from_raw(&raw, path, timer))
    }

    /// Reads a map that was already built and saved as JSON. Every polyline must still have
    /// exactly `POINTS_PER_SEGMENT` finite points.
    pub fn load_built(path: &str) -> Result<StaticMap> {
        let map: StaticMap = abstutil::read_json(path)?;
        map.check_points()
            .with_context(|| format!("{} isn't a valid built map", path))?;
        map.describe();
        Ok(map)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        abstutil::write_json(path, self)
    }

    pub fn get_id(&self) -> MapID {
        self.id
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_l(&self, id: LaneID) -> &LaneSegment {
        &self.lanes[&id]
    }

    pub fn maybe_get_l(&self, id: LaneID) -> Option<&LaneSegment> {
        self.lanes.get(&id)
    }

    pub fn maybe_get_c(&self, id: CrosswalkID) -> Option<&CrosswalkSegment> {
        self.crosswalks.get(&id)
    }

    pub fn maybe_get_b(&self, id: BoundaryID) -> Option<&BoundarySegment> {
        self.boundaries.get(&id)
    }

    /// Sorted by ID
    pub fn all_lanes(&self) -> impl Iterator<Item = &LaneSegment> {
        self.lanes.values()
    }

    pub fn all_crosswalks(&self) -> impl Iterator<Item = &CrosswalkSegment> {
        self.crosswalks.values()
    }

    /// Boundaries that aren't the left or right side of any lane
    pub fn all_orphan_boundaries(&self) -> impl Iterator<Item = &BoundarySegment> {
        self.boundaries.values()
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    fn check_points(&self) -> Result<()> {
        for l in self.lanes.values() {
            check_polyline(l.id, "centerline", &l.center.pts)?;
            check_polyline(l.id, "left boundary", &l.left_boundary.polyline.pts)?;
            check_polyline(l.id, "right boundary", &l.right_boundary.polyline.pts)?;
        }
        for c in self.crosswalks.values() {
            check_polyline(c.id, "polygon", &c.polygon.pts)?;
        }
        for b in self.boundaries.values() {
            check_polyline(b.id, "polyline", &b.polyline.pts)?;
        }
        Ok(())
    }

    pub(crate) fn describe(&self) {
        info!(
            "Map {} ({}): {} lanes, {} crosswalks, {} orphan boundaries",
            self.name,
            self.id,
            prettyprint_usize(self.lanes.len()),
            prettyprint_usize(self.crosswalks.len()),
            prettyprint_usize(self.boundaries.len())
        );
    }
}

fn check_polyline<ID: fmt::Display>(id: ID, what: &str, pl: &PolyLine) -> Result<()> {
    if pl.num_points() != POINTS_PER_SEGMENT {
        bail!(
            "{}'s {} has {} points, not {}",
            id,
            what,
            pl.num_points(),
            POINTS_PER_SEGMENT
        );
    }
    if let Some(pt) = pl.points().iter().find(|pt| !pt.is_finite()) {
        bail!("{}'s {} has a non-finite point {}", id, what, pt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use geom::Pt3D;

    use super::*;
    use crate::raw::{RawLanelet, RawLineString};

    #[test]
    fn map_id_is_deterministic_and_16_digits() {
        let a = MapID::from_path("data/lanelet2_map.osm");
        let b = MapID::from_path("data/lanelet2_map.osm");
        let c = MapID::from_path("data/other_map.osm");
        assert_eq!(a, b);
        assert_ne!(a, c);
        for id in [a, c, MapID(0), MapID(42)] {
            assert!(id.0 < 10_000_000_000_000_000);
            assert_eq!(id.to_string().len(), 16);
        }
        assert_eq!(MapID(42).to_string(), "0000000000000042");
    }

    fn one_lane() -> StaticMap {
        let line = |y| vec![Pt3D::new(0.0, y, 0.0), Pt3D::new(12.0, y, 0.0)];
        let mut raw = RawMap::blank();
        let mut ll = RawLanelet::new(1, "road");
        ll.centerline = line(0.0);
        ll.left_bound = Some(11);
        ll.right_bound = Some(12);
        raw.lanelets.push(ll);
        raw.linestrings
            .push(RawLineString::new(11, "line_thin", "dashed", line(1.5)));
        raw.linestrings
            .push(RawLineString::new(12, "road_border", "", line(-1.5)));
        raw.linestrings
            .push(RawLineString::new(13, "road_border", "", line(9.0)));
        StaticMap::create_from_raw(&raw, "one_lane.osm", &mut Timer::throwaway())
    }

    #[test]
    fn load_built_checks_point_counts() {
        let path = std::env::temp_dir()
            .join(format!("map_model_load_built_{}.json", std::process::id()))
            .to_string_lossy()
            .to_string();

        let map = one_lane();
        map.save(&path).unwrap();
        let loaded = StaticMap::load_built(&path).unwrap();
        assert_eq!(loaded.get_id(), map.get_id());
        assert_eq!(loaded.num_lanes(), 1);

        let mut broken = map.clone();
        let lane = broken.lanes.get_mut(&LaneID(1)).unwrap();
        let empty: PolyLine = abstutil::from_json(r#"{"pts": []}"#).unwrap();
        lane.center.pts = empty.clone();
        lane.left_boundary.polyline.pts = empty.clone();
        lane.right_boundary.polyline.pts = empty;
        broken.save(&path).unwrap();
        let err = StaticMap::load_built(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Lane #1's centerline has 0 points, not 20"));

        let mut short = map.clone();
        let boundary = short.boundaries.values_mut().next().unwrap();
        boundary.polyline.pts = PolyLine::new(vec![Pt3D::new(0.0, 9.0, 0.0)]).unwrap();
        short.save(&path).unwrap();
        assert!(StaticMap::load_built(&path).is_err());

        std::fs::remove_file(&path).unwrap();
    }
}
