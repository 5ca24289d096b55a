//! Ego-vehicle state and its simulator-native raw form.

use serde::{Deserialize, Serialize};

/// A 2D position in the simulator's world frame, meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitudinal coordinate.
    pub x: f64,
    /// Lateral coordinate.
    pub y: f64,
}

/// The simulator-native vehicle state, as exposed by the engine.
///
/// This is the raw form the adapter extracts [`EgoState`] from; consumers
/// above the adapter never see it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawVehicleState {
    /// World-frame position, `[x, y]`, meters.
    pub position: [f64; 2],
    /// World-frame velocity, `[vx, vy]`, m/s.
    pub velocity: [f64; 2],
    /// Heading in radians, simulator-frame convention.
    pub heading: f64,
    /// Whether the vehicle is on a drivable lane.
    pub on_lane: bool,
}

/// Structured snapshot of the controlled vehicle.
///
/// Recomputed on demand after every step or reset, never cached, so it
/// always reflects the simulator's most recent state exactly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EgoState {
    /// World-frame position.
    pub position: Position,
    /// Ground speed in m/s, always `>= 0`.
    pub speed: f64,
    /// Heading in radians, simulator-frame convention.
    pub heading: f64,
    /// Whether the vehicle is on a drivable lane.
    pub on_lane: bool,
}

impl EgoState {
    /// Extract the structured snapshot from the simulator-native form.
    ///
    /// Speed is derived as the velocity magnitude, which is non-negative
    /// by construction. No randomness is involved anywhere in extraction.
    pub fn from_raw(raw: &RawVehicleState) -> Self {
        let [vx, vy] = raw.velocity;
        Self {
            position: Position {
                x: raw.position[0],
                y: raw.position[1],
            },
            speed: vx.hypot(vy),
            heading: raw.heading,
            on_lane: raw.on_lane,
        }
    }
}
