use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, EPSILON_DIST};

/// A position in the plane, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }
        Pt2D { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters(((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt())
    }

    /// The arithmetic mean of some points. None if there are no points.
    pub fn center(pts: &[Pt2D]) -> Option<Pt2D> {
        if pts.is_empty() {
            return None;
        }
        let len = pts.len() as f64;
        let (x, y) = pts
            .iter()
            .fold((0.0, 0.0), |(x, y), pt| (x + pt.x, y + pt.y));
        Some(Pt2D::new(x / len, y / len))
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

/// A position in space, in meters. Map data keeps the elevation around, even though most of the
/// pipeline only cares about the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt3D {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Pt3D {
    pub fn new(x: f64, y: f64, z: f64) -> Pt3D {
        Pt3D { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_2d(self) -> Pt2D {
        Pt2D::new(self.x, self.y)
    }

    pub fn dist_to(self, to: Pt3D) -> Distance {
        Distance::meters(
            ((self.x - to.x).powi(2) + (self.y - to.y).powi(2) + (self.z - to.z).powi(2)).sqrt(),
        )
    }

    /// Ignores elevation.
    pub fn planar_dist_to(self, to: Pt3D) -> Distance {
        self.to_2d().dist_to(to.to_2d())
    }

    /// Linear interpolation towards `to`; 0 is self, 1 is `to`.
    pub fn lerp(self, to: Pt3D, frac: f64) -> Pt3D {
        Pt3D::new(
            self.x + frac * (to.x - self.x),
            self.y + frac * (to.y - self.y),
            self.z + frac * (to.z - self.z),
        )
    }

    /// Component-wise difference, self - other.
    pub fn minus(self, other: Pt3D) -> Pt3D {
        Pt3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn approx_eq(self, other: Pt3D) -> bool {
        self.dist_to(other) <= EPSILON_DIST
    }
}

impl fmt::Display for Pt3D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt3D({0}, {1}, {2})", self.x, self.y, self.z)
    }
}
