use serde::{Deserialize, Serialize};

/// In meters per second. Map data states speed limits in km/h; they're converted once, while
/// building the map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Speed(f64);

impl Speed {
    pub fn meters_per_second(value: f64) -> Speed {
        if !value.is_finite() {
            panic!("Bad Speed {}", value);
        }
        Speed(value)
    }

    pub fn km_per_hour(value: f64) -> Speed {
        Speed::meters_per_second(value / 3.6)
    }

    pub fn inner_meters_per_second(self) -> f64 {
        self.0
    }
}
