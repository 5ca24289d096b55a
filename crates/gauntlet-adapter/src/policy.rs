//! Control policies for episode execution.
//!
//! [`Policy`] is the seam where future components attach: an adversarial
//! agent or a trained controller plugs in here without the executor
//! changing. The only policy shipped today is the constant
//! [`ForwardPolicy`].

use gauntlet_core::{Action, EgoState};

/// Maps the current ego state and observation to a control action.
pub trait Policy {
    /// Choose the next action.
    ///
    /// Takes `&mut self` so stateful controllers (recurrent models,
    /// stateful adversaries) fit the same seam.
    fn act(&mut self, ego: &EgoState, observation: &[f32]) -> Action;

    /// Human-readable policy name, for diagnostics and run records.
    fn name(&self) -> &str;
}

/// Drives straight ahead at half throttle, ignoring all input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardPolicy;

impl Policy for ForwardPolicy {
    fn act(&mut self, _ego: &EgoState, _observation: &[f32]) -> Action {
        Action::new(0.0, 0.5)
    }

    fn name(&self) -> &str {
        "forward"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_core::Position;

    #[test]
    fn forward_policy_is_constant() {
        let ego = EgoState {
            position: Position { x: 1.0, y: 2.0 },
            speed: 3.0,
            heading: 0.4,
            on_lane: true,
        };
        let mut policy = ForwardPolicy;
        assert_eq!(policy.act(&ego, &[0.5; 8]), Action::new(0.0, 0.5));
        assert_eq!(policy.act(&ego, &[]), Action::new(0.0, 0.5));
        assert_eq!(policy.name(), "forward");
    }
}
