use std::f64;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians and normalized to [0, 2pi).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads.rem_euclid(2.0 * f64::consts::PI))
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle::new_rads(degs.to_radians())
    }

    /// The (cos, sin) pair, the unambiguous way to hand a heading to a model.
    pub fn cos_sin(self) -> (f64, f64) {
        let (sin, cos) = self.0.sin_cos();
        (cos, sin)
    }
}
