//! Small maps built in code, for tests.

use abstutil::Timer;
use geom::Pt3D;
use map_model::raw::{RawLanelet, RawLineString, RawMap, RawRegulatoryElement};
use map_model::{lanelet, StaticMap};

pub const LANE_HALF_WIDTH: f64 = 1.75;

pub struct LaneSpec {
    pub id: i64,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub speed_limit_kph: Option<f64>,
    pub traffic_lights: Vec<i64>,
}

/// A two-point lane with boundaries `LANE_HALF_WIDTH` to either side, and a 36 km/h speed limit.
pub fn straight(id: i64, from: (f64, f64), to: (f64, f64)) -> LaneSpec {
    LaneSpec {
        id,
        from,
        to,
        speed_limit_kph: Some(36.0),
        traffic_lights: Vec::new(),
    }
}

pub fn build(specs: Vec<LaneSpec>) -> StaticMap {
    let mut raw = RawMap::blank();
    for spec in specs {
        let (dx, dy) = (spec.to.0 - spec.from.0, spec.to.1 - spec.from.1);
        let len = dx.hypot(dy);
        // Left of the direction of travel
        let (nx, ny) = if len > 0.0 {
            (-dy / len, dx / len)
        } else {
            (0.0, 1.0)
        };
        let shifted = |offset: f64| {
            vec![
                Pt3D::new(spec.from.0 + nx * offset, spec.from.1 + ny * offset, 0.0),
                Pt3D::new(spec.to.0 + nx * offset, spec.to.1 + ny * offset, 0.0),
            ]
        };

        let left_id = spec.id * 10 + 1;
        let right_id = spec.id * 10 + 2;
        raw.linestrings.push(RawLineString::new(
            left_id,
            "line_thin",
            "dashed",
            shifted(LANE_HALF_WIDTH),
        ));
        raw.linestrings.push(RawLineString::new(
            right_id,
            "road_border",
            "",
            shifted(-LANE_HALF_WIDTH),
        ));

        let mut ll = RawLanelet::new(spec.id, "road");
        ll.centerline = shifted(0.0);
        ll.left_bound = Some(left_id);
        ll.right_bound = Some(right_id);
        if let Some(kph) = spec.speed_limit_kph {
            ll.attributes
                .insert(lanelet::SPEED_LIMIT.to_string(), kph.to_string());
        }
        for id in spec.traffic_lights {
            if !raw.regulatory_elements.iter().any(|re| re.id == id) {
                raw.regulatory_elements
                    .push(RawRegulatoryElement::traffic_light(id));
            }
            ll.regulatory_elements.push(id);
        }
        raw.lanelets.push(ll);
    }
    StaticMap::create_from_raw(&raw, "fixture", &mut Timer::throwaway())
}
