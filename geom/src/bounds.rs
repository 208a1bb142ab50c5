use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D};

/// An axis-aligned rectangle in the plane.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// A square centered on a point, extending `half_width` in every direction.
    pub fn around(center: Pt2D, half_width: Distance) -> Bounds {
        let r = half_width.abs().inner_meters();
        Bounds {
            min_x: center.x() - r,
            min_y: center.y() - r,
            max_x: center.x() + r,
            max_y: center.y() + r,
        }
    }

    /// A point exactly on an edge is outside.
    pub fn strictly_contains(&self, pt: Pt2D) -> bool {
        pt.x() > self.min_x && pt.x() < self.max_x && pt.y() > self.min_y && pt.y() < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_edges() {
        let b = Bounds::around(Pt2D::new(10.0, -5.0), Distance::meters(-2.0));
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (8.0, 12.0, -7.0, -3.0));
        assert!(b.strictly_contains(Pt2D::new(11.9, -3.1)));
        assert!(b.strictly_contains(Pt2D::new(10.0, -5.0)));
        assert!(!b.strictly_contains(Pt2D::new(12.0, -5.0)));
        assert!(!b.strictly_contains(Pt2D::new(10.0, -7.0)));
        assert!(!b.strictly_contains(Pt2D::new(7.0, -5.0)));
    }
}
