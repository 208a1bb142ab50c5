use anyhow::{Context, Result};

use abstutil::Timer;
use geom::Speed;

use super::RawIndex;
use crate::make::boundaries::make_boundary;
use crate::raw::RawLanelet;
use crate::{
    lanelet, BoundarySegment, LaneID, LaneKind, LaneSegment, PolylineType, TrafficLightID,
    TypedPolyline,
};

pub fn make_lane(
    ll: &RawLanelet,
    kind: LaneKind,
    index: &RawIndex,
    timer: &mut Timer,
) -> Result<LaneSegment> {
    if ll.centerline.is_empty() {
        bail!("no centerline");
    }
    let left_boundary = resolve_bound(ll.left_bound, index).context("left bound")?;
    let right_boundary = resolve_bound(ll.right_bound, index).context("right bound")?;

    let (spaced_center, center) = super::resample(&ll.centerline).context("centerline")?;
    let centroid = spaced_center.planar_center();

    Ok(LaneSegment {
        id: LaneID(ll.id),
        center: TypedPolyline {
            polyline_type: PolylineType::LaneCenter(kind),
            pts: center,
        },
        left_boundary,
        right_boundary,
        left_neighbor: first_neighbor(ll, &ll.left_neighbors, "left", timer),
        right_neighbor: first_neighbor(ll, &ll.right_neighbors, "right", timer),
        is_intersection: ll.attributes.contains_key(lanelet::TURN_DIRECTION),
        speed_limit: parse_speed_limit(ll, timer),
        traffic_lights: traffic_lights(ll, index, timer),
        centroid,
    })
}

fn resolve_bound(id: Option<i64>, index: &RawIndex) -> Result<BoundarySegment> {
    let id = match id {
        Some(id) => id,
        None => bail!("missing"),
    };
    match index.linestrings.get(&id) {
        Some(ls) => make_boundary(ls),
        None => bail!("linestring {} doesn't exist", id),
    }
}

fn first_neighbor(
    ll: &RawLanelet,
    neighbors: &[i64],
    side: &str,
    timer: &mut Timer,
) -> Option<LaneID> {
    if neighbors.len() > 1 {
        timer.warn(format!(
            "Lanelet {} has {} {} neighbors; only keeping {}",
            ll.id,
            neighbors.len(),
            side,
            neighbors[0]
        ));
    }
    neighbors.first().map(|id| LaneID(*id))
}

/// The attribute is in km/h. This is the only place the native unit is seen.
fn parse_speed_limit(ll: &RawLanelet, timer: &mut Timer) -> Option<Speed> {
    let raw = ll.attributes.get(lanelet::SPEED_LIMIT)?;
    match raw.trim().parse::<f64>() {
        Ok(kph) if kph.is_finite() && kph >= 0.0 => Some(Speed::km_per_hour(kph)),
        _ => {
            timer.warn(format!(
                "Lanelet {} has a weird speed_limit {:?}; treating it as missing",
                ll.id, raw
            ));
            None
        }
    }
}

fn traffic_lights(ll: &RawLanelet, index: &RawIndex, timer: &mut Timer) -> Vec<TrafficLightID> {
    let mut results = Vec::new();
    for id in &ll.regulatory_elements {
        match index.regulatory_elements.get(id) {
            Some(re) => {
                if re.is_traffic_light() {
                    results.push(TrafficLightID(*id));
                }
            }
            None => timer.warn(format!(
                "Lanelet {} references regulatory element {}, which doesn't exist",
                ll.id, id
            )),
        }
    }
    results
}
