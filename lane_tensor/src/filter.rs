use anyhow::Result;

use geom::{Distance, Pt3D, Speed};
use map_model::{LaneID, LaneSegment};

use crate::traffic_light::{self, TrafficLightEncoding, TrafficLightRecognition};
use crate::{EgoFrame, LANE_CHANNELS};

/// One lane that survived cropping, already in the ego frame. Owns its buffers; nothing here
/// aliases the map.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneFeatures {
    pub id: LaneID,
    /// One row per resampled point:
    /// `[x, y, dx, dy, left_dx, left_dy, right_dx, right_dy, green, yellow, red, unknown]`
    pub points: Vec<[f32; LANE_CHANNELS]>,
    pub speed_limit: Option<Speed>,
    /// From the ego to the first centerline point. Lanes are ranked by this, not the centroid.
    pub entry_distance: Distance,
    pub traffic_light: TrafficLightEncoding,
}

/// Crops, transforms, and encodes one lane. Returns `None` if the lane's centroid isn't strictly
/// inside the square window of `window_half_width` around the ego.
pub fn process_lane(
    lane: &LaneSegment,
    ego: &EgoFrame,
    window_half_width: Distance,
    recognition: &TrafficLightRecognition,
) -> Result<Option<LaneFeatures>> {
    if !ego.window(window_half_width).strictly_contains(lane.centroid) {
        return Ok(None);
    }

    let center = ego.to_ego().apply_all(lane.center_pts());
    let left = ego.to_ego().apply_all(lane.left_pts());
    let right = ego.to_ego().apply_all(lane.right_pts());
    if left.len() != center.len() || right.len() != center.len() {
        bail!(
            "{} has {} center, {} left, and {} right points",
            lane.id,
            center.len(),
            left.len(),
            right.len()
        );
    }

    let entry = match center.first() {
        Some(pt) => *pt,
        None => bail!("{} has no points", lane.id),
    };

    let traffic_light = traffic_light::encode(lane, recognition)?;
    let [green, yellow, red, unknown] = traffic_light.one_hot;

    let zero = Pt3D::new(0.0, 0.0, 0.0);
    let mut points = Vec::with_capacity(center.len());
    for (idx, pt) in center.iter().enumerate() {
        // The last point has no successor
        let delta = match center.get(idx + 1) {
            Some(next) => next.minus(*pt),
            None => zero,
        };
        let left_offset = left[idx].minus(*pt);
        let right_offset = right[idx].minus(*pt);
        points.push([
            pt.x as f32,
            pt.y as f32,
            delta.x as f32,
            delta.y as f32,
            left_offset.x as f32,
            left_offset.y as f32,
            right_offset.x as f32,
            right_offset.y as f32,
            green,
            yellow,
            red,
            unknown,
        ]);
    }

    Ok(Some(LaneFeatures {
        id: lane.id,
        points,
        speed_limit: lane.speed_limit,
        entry_distance: Distance::meters(entry.x.hypot(entry.y)),
        traffic_light,
    }))
}

#[cfg(test)]
mod tests {
    use geom::{Angle, Pose};
    use map_model::{TrafficLightID, POINTS_PER_SEGMENT};
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::fixtures::{build, straight, LANE_HALF_WIDTH};
    use crate::traffic_light::{RED, UNKNOWN};

    fn ego_at(x: f64, y: f64, degrees: f64) -> EgoFrame {
        EgoFrame::new(Pose::new(Pt3D::new(x, y, 0.0), Angle::degrees(degrees)))
    }

    fn close(a: f32, b: f64) -> bool {
        (f64::from(a) - b).abs() < 1e-3
    }

    #[test]
    fn lane_ahead_of_ego() {
        // Ego at (100, 50) facing north; the lane runs north from 10m ahead
        let map = build(vec![straight(1, (100.0, 60.0), (100.0, 79.0))]);
        let lane = map.get_l(LaneID(1));
        let ego = ego_at(100.0, 50.0, 90.0);
        let features = process_lane(
            lane,
            &ego,
            Distance::meters(110.0),
            &TrafficLightRecognition::new(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(features.points.len(), POINTS_PER_SEGMENT);
        assert!((features.entry_distance.inner_meters() - 10.0).abs() < 1e-9);
        let speed = features.speed_limit.unwrap().inner_meters_per_second();
        assert!((speed - 10.0).abs() < 1e-9);

        for (idx, row) in features.points.iter().enumerate() {
            // Straight ahead, 1m apart
            assert!(close(row[0], 10.0 + idx as f64));
            assert!(close(row[1], 0.0));
            if idx + 1 < POINTS_PER_SEGMENT {
                assert!(close(row[2], 1.0) && close(row[3], 0.0));
            } else {
                assert_eq!((row[2], row[3]), (0.0, 0.0));
            }
            // Left of travel is +y in the ego frame
            assert!(close(row[4], 0.0) && close(row[5], LANE_HALF_WIDTH));
            assert!(close(row[6], 0.0) && close(row[7], -LANE_HALF_WIDTH));
            assert!(row[8..] == UNKNOWN);
        }
    }

    #[test]
    fn window_is_strict() {
        // The centroid is on y = 0, 2m south of the ego
        let map = build(vec![straight(1, (0.0, 0.0), (10.0, 0.0))]);
        let lane = map.get_l(LaneID(1));
        let recognition = TrafficLightRecognition::new();
        let ego = ego_at(5.0, 2.0, 0.0);

        let inside = process_lane(lane, &ego, Distance::meters(2.5), &recognition).unwrap();
        assert!(inside.is_some());
        // Exactly on the edge is out
        let edge = process_lane(lane, &ego, Distance::meters(2.0), &recognition).unwrap();
        assert!(edge.is_none());
        let outside = process_lane(lane, &ego, Distance::meters(1.0), &recognition).unwrap();
        assert!(outside.is_none());
    }

    #[test]
    fn offsets_and_deltas_reconstruct_the_geometry() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let mut specs = Vec::new();
        for id in 1..30 {
            let from = (rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let to = (rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            specs.push(straight(id, from, to));
        }
        let map = build(specs);

        for _ in 0..20 {
            let pose = Pose::new(
                Pt3D::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0), 0.0),
                Angle::degrees(rng.gen_range(0.0..360.0)),
            );
            let ego = EgoFrame::new(pose);
            let to_map = pose.to_map_frame();
            for lane in map.all_lanes() {
                let features = match process_lane(
                    lane,
                    &ego,
                    Distance::meters(1000.0),
                    &TrafficLightRecognition::new(),
                )
                .unwrap()
                {
                    Some(f) => f,
                    None => continue,
                };
                for (idx, row) in features.points.iter().enumerate() {
                    let center = Pt3D::new(f64::from(row[0]), f64::from(row[1]), 0.0);
                    let left = Pt3D::new(
                        f64::from(row[0] + row[4]),
                        f64::from(row[1] + row[5]),
                        0.0,
                    );
                    let center_err = to_map.apply(center).dist_to(lane.center_pts()[idx]);
                    let left_err = to_map.apply(left).dist_to(lane.left_pts()[idx]);
                    assert!(center_err.inner_meters() < 1e-3);
                    assert!(left_err.inner_meters() < 1e-3);
                    if idx + 1 < features.points.len() {
                        let next = features.points[idx + 1];
                        assert!(close(row[0] + row[2], f64::from(next[0])));
                        assert!(close(row[1] + row[3], f64::from(next[1])));
                    }
                }
            }
        }
    }

    #[test]
    fn traffic_light_is_replicated() {
        let mut spec = straight(1, (0.0, 0.0), (10.0, 0.0));
        spec.traffic_lights = vec![7];
        let map = build(vec![spec]);
        let recognition = TrafficLightRecognition::from([(TrafficLightID(7), 1)]);
        let features = process_lane(
            map.get_l(LaneID(1)),
            &ego_at(0.0, 0.0, 0.0),
            Distance::meters(100.0),
            &recognition,
        )
        .unwrap()
        .unwrap();
        assert!(features.points.iter().all(|row| row[8..] == RED));

        let bad = TrafficLightRecognition::from([(TrafficLightID(7), 0)]);
        assert!(process_lane(
            map.get_l(LaneID(1)),
            &ego_at(0.0, 0.0, 0.0),
            Distance::meters(100.0),
            &bad,
        )
        .is_err());
    }

    #[test]
    fn empty_lane_is_an_error() {
        let map = build(vec![straight(1, (0.0, 0.0), (10.0, 0.0))]);
        let mut lane = map.get_l(LaneID(1)).clone();
        let empty: geom::PolyLine = abstutil::from_json(r#"{"pts": []}"#).unwrap();
        lane.center.pts = empty.clone();
        lane.left_boundary.polyline.pts = empty.clone();
        lane.right_boundary.polyline.pts = empty;

        let err = process_lane(
            &lane,
            &ego_at(0.0, 0.0, 0.0),
            Distance::meters(100.0),
            &TrafficLightRecognition::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Lane #1 has no points"));
    }

    #[test]
    fn map_is_untouched() {
        let map = build(vec![straight(1, (3.0, 4.0), (30.0, 4.0))]);
        let before = map.clone();
        process_lane(
            map.get_l(LaneID(1)),
            &ego_at(-7.0, 2.0, 33.0),
            Distance::meters(100.0),
            &TrafficLightRecognition::new(),
        )
        .unwrap();
        assert_eq!(map, before);
    }
}
