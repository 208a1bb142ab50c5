use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use crate::{Angle, Pt2D, Pt3D};

/// Where something is and which way it faces, in the map frame. Only the heading (yaw) is
/// modelled; roads are assumed to be close enough to level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Pt3D,
    pub heading: Angle,
}

impl Pose {
    pub fn new(position: Pt3D, heading: Angle) -> Pose {
        Pose { position, heading }
    }

    /// The pose itself as a transform, taking points from this pose's local frame into the map
    /// frame.
    pub fn to_map_frame(&self) -> Transform {
        let (cos, sin) = self.heading.cos_sin();
        let p = self.position;
        Transform(Matrix4::new(
            cos, -sin, 0.0, p.x, //
            sin, cos, 0.0, p.y, //
            0.0, 0.0, 1.0, p.z, //
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// The inverse of the pose, taking map-frame points into this pose's local frame. The local
    /// frame has its origin at `position` and its +x axis along `heading`.
    pub fn from_map_frame(&self) -> Transform {
        // The inverse of a rigid transform [R t] is [R^T -R^T t], no general inversion needed.
        let (cos, sin) = self.heading.cos_sin();
        let p = self.position;
        Transform(Matrix4::new(
            cos,
            sin,
            0.0,
            -(cos * p.x + sin * p.y),
            -sin,
            cos,
            0.0,
            sin * p.x - cos * p.y,
            0.0,
            0.0,
            1.0,
            -p.z,
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    pub fn planar_position(&self) -> Pt2D {
        self.position.to_2d()
    }
}

/// A 4x4 homogeneous transform between two frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform(Matrix4<f64>);

impl Transform {
    pub fn apply(&self, pt: Pt3D) -> Pt3D {
        let v = self.0 * Vector4::new(pt.x, pt.y, pt.z, 1.0);
        Pt3D::new(v[0], v[1], v[2])
    }

    /// Transforms every point into a new buffer; the input is untouched.
    pub fn apply_all(&self, pts: &[Pt3D]) -> Vec<Pt3D> {
        pts.iter().map(|pt| self.apply(*pt)).collect()
    }
}
