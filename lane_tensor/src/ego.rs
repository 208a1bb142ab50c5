use geom::{Bounds, Distance, Pose, Pt2D, Transform};

/// The ego vehicle's frame for one planning cycle: where it is in the map, and how to carry map
/// points into its frame.
#[derive(Clone, Debug)]
pub struct EgoFrame {
    center: Pt2D,
    to_ego: Transform,
}

impl EgoFrame {
    pub fn new(pose: Pose) -> EgoFrame {
        EgoFrame {
            center: pose.planar_position(),
            to_ego: pose.from_map_frame(),
        }
    }

    /// The ego position in the map frame
    pub fn center(&self) -> Pt2D {
        self.center
    }

    pub fn to_ego(&self) -> &Transform {
        &self.to_ego
    }

    /// The square cropping window around the ego, in the map frame.
    pub fn window(&self, half_width: Distance) -> Bounds {
        Bounds::around(self.center, half_width)
    }
}

#[cfg(test)]
mod tests {
    use geom::{Angle, Pt3D};

    use super::*;

    #[test]
    fn window_follows_the_position_not_the_heading() {
        let pose = Pose::new(Pt3D::new(12.0, -3.0, 1.0), Angle::degrees(30.0));
        let ego = EgoFrame::new(pose);
        assert_eq!(ego.center(), Pt2D::new(12.0, -3.0));
        let origin = ego.to_ego().apply(pose.position);
        assert!(origin.dist_to(Pt3D::new(0.0, 0.0, 0.0)).inner_meters() < 1e-9);

        let window = ego.window(Distance::meters(5.0));
        assert_eq!(window.min_x, 7.0);
        assert_eq!(window.max_y, 2.0);
    }
}
