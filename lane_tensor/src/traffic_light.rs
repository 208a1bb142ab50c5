use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use map_model::{LaneSegment, TrafficLightID};

/// The latest observed signal code for each traffic-light regulatory element, as reported by the
/// recognition stack for one planning cycle.
pub type TrafficLightRecognition = BTreeMap<TrafficLightID, u8>;

/// The closed set of codes the recognition stack emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalColor {
    Red,
    Amber,
    Green,
    /// The light is visible but its state wasn't classified
    White,
}

impl TryFrom<u8> for SignalColor {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> Result<SignalColor> {
        match code {
            1 => Ok(SignalColor::Red),
            2 => Ok(SignalColor::Amber),
            3 => Ok(SignalColor::Green),
            4 => Ok(SignalColor::White),
            _ => bail!("Unrecognized traffic light code {}", code),
        }
    }
}

impl SignalColor {
    pub fn code(self) -> u8 {
        match self {
            SignalColor::Red => 1,
            SignalColor::Amber => 2,
            SignalColor::Green => 3,
            SignalColor::White => 4,
        }
    }

    pub fn one_hot(self) -> [f32; 4] {
        match self {
            SignalColor::Green => GREEN,
            SignalColor::Amber => YELLOW,
            SignalColor::Red => RED,
            SignalColor::White => UNKNOWN,
        }
    }
}

// Slots are [green, yellow, red, unknown]
pub const GREEN: [f32; 4] = [1.0, 0.0, 0.0, 0.0];
pub const YELLOW: [f32; 4] = [0.0, 1.0, 0.0, 0.0];
pub const RED: [f32; 4] = [0.0, 0.0, 1.0, 0.0];
pub const UNKNOWN: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// The signal state of one lane, identical for every point along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficLightEncoding {
    pub one_hot: [f32; 4],
    /// The lane is governed by more than one traffic light, and only the first was used.
    pub ambiguous: bool,
}

impl TrafficLightEncoding {
    pub fn unknown() -> TrafficLightEncoding {
        TrafficLightEncoding {
            one_hot: UNKNOWN,
            ambiguous: false,
        }
    }
}

/// Encodes the state of the first traffic light governing a lane. A lane without a light, or
/// whose light wasn't observed this cycle, is unknown. Fails only on a code outside the closed
/// enumeration.
pub fn encode(
    lane: &LaneSegment,
    recognition: &TrafficLightRecognition,
) -> Result<TrafficLightEncoding> {
    let id = match lane.traffic_lights.first() {
        Some(id) => *id,
        None => return Ok(TrafficLightEncoding::unknown()),
    };
    let one_hot = match recognition.get(&id) {
        Some(code) => SignalColor::try_from(*code)
            .with_context(|| format!("{} on {}", id, lane.id))?
            .one_hot(),
        None => UNKNOWN,
    };
    Ok(TrafficLightEncoding {
        one_hot,
        ambiguous: lane.traffic_lights.len() > 1,
    })
}
