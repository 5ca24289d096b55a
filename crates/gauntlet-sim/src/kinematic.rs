//! The kinematic simulator engine.

use std::f64::consts::{FRAC_PI_2, PI};

use gauntlet_adapter::AdapterConfig;
use gauntlet_core::{
    Action, ActionSpace, Observation, ObservationSpace, RawVehicleState, SimError, Simulator,
    StepInfo, StepResult,
};

use crate::route::{RoutePlan, ROAD_HALF_WIDTH};

// ── Engine constants ────────────────────────────────────────────

/// Control tick length, seconds.
pub const DT: f64 = 0.1;
/// Peak acceleration at full throttle, m/s².
const MAX_ACCEL: f64 = 4.0;
/// Linear drag coefficient, 1/s.
const DRAG: f64 = 0.3;
/// Speed ceiling, m/s.
const MAX_SPEED: f64 = 30.0;
/// Heading rate at full steering lock, rad/s.
const MAX_STEER_RATE: f64 = 0.6;
/// Contact distance to an obstacle that counts as a crash, meters.
const COLLISION_RADIUS: f64 = 2.0;
/// Lateral offset beyond which the vehicle has left the road, meters.
const OFF_ROAD_LIMIT: f64 = ROAD_HALF_WIDTH * 1.5;
/// Longitudinal spawn position, meters.
const START_X: f64 = 5.0;
/// Engine-side episode horizon, ticks.
const HORIZON: u64 = 1000;

/// Range sensor reach, meters.
const SENSOR_RANGE: f64 = 50.0;
/// Number of forward-arc range sensor rays.
const RAY_COUNT: usize = 10;
/// Ego block (progress, lateral, cos/sin heading, speed) plus rays.
const OBS_SHAPE: usize = 5 + RAY_COUNT;

/// Reward per meter of forward progress.
const PROGRESS_REWARD: f64 = 0.1;
/// Penalty on crashing or leaving the road.
const FAILURE_PENALTY: f64 = 5.0;
/// Bonus on reaching the destination.
const ARRIVAL_BONUS: f64 = 10.0;

/// Headless deterministic driving engine.
///
/// World generation draws exclusively from the episode seed; the
/// per-tick dynamics are RNG-free. Control inputs are clamped to
/// `[-1, 1]`; that clamping is this engine's documented behavior, not
/// the adapter's.
#[derive(Clone, Debug)]
pub struct KinematicSim {
    map_name: String,
    traffic_density: f64,
    route: RoutePlan,
    x: f64,
    y: f64,
    heading: f64,
    speed: f64,
    tick: u64,
}

impl KinematicSim {
    /// Build an engine directly from map parameters.
    ///
    /// The world is generated immediately from `seed`, so spaces and
    /// vehicle state are valid before the first reset.
    pub fn new(map_name: &str, traffic_density: f64, seed: u64) -> Result<Self, SimError> {
        let route = RoutePlan::generate(map_name, traffic_density, seed)?;
        Ok(Self {
            map_name: map_name.to_string(),
            traffic_density,
            route,
            x: START_X,
            y: 0.0,
            heading: 0.0,
            speed: 0.0,
            tick: 0,
        })
    }

    /// Backend entry point for [`SimAdapter::connect`].
    ///
    /// Rejects configurations this headless engine cannot honor:
    /// rendering and manual control.
    ///
    /// [`SimAdapter::connect`]: gauntlet_adapter::SimAdapter::connect
    pub fn connect(config: &AdapterConfig) -> Result<Box<dyn Simulator>, SimError> {
        if config.use_render {
            return Err(SimError::RenderUnavailable);
        }
        if config.manual_control {
            return Err(SimError::backend(
                "manual control requires an interactive engine",
            ));
        }
        let sim = Self::new(&config.map_name, config.traffic_density, config.start_seed)?;
        Ok(Box::new(sim))
    }

    fn observe(&self) -> Observation {
        let mut obs = Vec::with_capacity(OBS_SHAPE);
        obs.push(((self.x / self.route.length).clamp(0.0, 1.0)) as f32);
        obs.push((self.y / ROAD_HALF_WIDTH) as f32);
        obs.push(self.heading.cos() as f32);
        obs.push(self.heading.sin() as f32);
        obs.push((self.speed / MAX_SPEED) as f32);

        // Forward-arc range sensor: nearest obstacle per ray sector,
        // normalized to [0, 1], 1.0 when the sector is clear.
        let mut rays = [SENSOR_RANGE; RAY_COUNT];
        for obstacle in &self.route.obstacles {
            let dx = obstacle.x - self.x;
            let dy = obstacle.y - self.y;
            let distance = dx.hypot(dy);
            if distance > SENSOR_RANGE {
                continue;
            }
            let bearing = wrap_angle(dy.atan2(dx) - self.heading);
            if bearing.abs() > FRAC_PI_2 {
                continue;
            }
            let sector = (((bearing + FRAC_PI_2) / PI) * RAY_COUNT as f64) as usize;
            let sector = sector.min(RAY_COUNT - 1);
            if distance < rays[sector] {
                rays[sector] = distance;
            }
        }
        obs.extend(rays.iter().map(|r| (r / SENSOR_RANGE) as f32));
        obs
    }
}

/// Wrap an angle to `(-π, π]`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

impl Simulator for KinematicSim {
    fn action_space(&self) -> ActionSpace {
        ActionSpace::steering_throttle()
    }

    fn observation_space(&self) -> ObservationSpace {
        ObservationSpace { shape: OBS_SHAPE }
    }

    fn reset(&mut self, seed: u64) -> Result<(Observation, StepInfo), SimError> {
        self.route = RoutePlan::generate(&self.map_name, self.traffic_density, seed)?;
        self.x = START_X;
        self.y = 0.0;
        self.heading = 0.0;
        self.speed = 0.0;
        self.tick = 0;
        Ok((self.observe(), StepInfo::default()))
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, SimError> {
        let [steering, throttle] = action.components().ok_or_else(|| {
            SimError::backend("action must have exactly two components")
        })?;
        let steering = steering.clamp(-1.0, 1.0);
        let throttle = throttle.clamp(-1.0, 1.0);

        let prev_x = self.x;
        self.speed = (self.speed + (throttle * MAX_ACCEL - DRAG * self.speed) * DT)
            .clamp(0.0, MAX_SPEED);
        self.heading = wrap_angle(self.heading + steering * MAX_STEER_RATE * DT);
        self.x += self.speed * self.heading.cos() * DT;
        self.y += self.speed * self.heading.sin() * DT;
        self.tick += 1;

        let crash = self
            .route
            .obstacles
            .iter()
            .any(|o| (o.x - self.x).hypot(o.y - self.y) <= COLLISION_RADIUS);
        let arrive_dest = self.x >= self.route.length;
        let out_of_road = self.y.abs() > OFF_ROAD_LIMIT;

        let terminated = crash || arrive_dest || out_of_road;
        let truncated = !terminated && self.tick >= HORIZON;

        let mut reward = PROGRESS_REWARD * (self.x - prev_x);
        if crash || out_of_road {
            reward -= FAILURE_PENALTY;
        } else if arrive_dest {
            reward += ARRIVAL_BONUS;
        }

        Ok(StepResult {
            observation: self.observe(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                crash,
                arrive_dest,
                out_of_road,
            },
        })
    }

    fn vehicle_state(&self) -> RawVehicleState {
        RawVehicleState {
            position: [self.x, self.y],
            velocity: [
                self.speed * self.heading.cos(),
                self.speed * self.heading.sin(),
            ],
            heading: self.heading,
            on_lane: self.y.abs() <= ROAD_HALF_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> Action {
        Action::new(0.0, 0.5)
    }

    fn drive_until_final(sim: &mut KinematicSim, action: Action, max: usize) -> StepResult {
        for _ in 0..max {
            let result = sim.step(&action).expect("step");
            if result.is_final() {
                return result;
            }
        }
        panic!("no terminal step within {max} ticks");
    }

    // ── Backend construction ─────────────────────────────────

    #[test]
    fn connect_rejects_rendering() {
        let config = AdapterConfig {
            use_render: true,
            ..AdapterConfig::default()
        };
        assert_eq!(
            KinematicSim::connect(&config).err(),
            Some(SimError::RenderUnavailable)
        );
    }

    #[test]
    fn connect_rejects_manual_control() {
        let config = AdapterConfig {
            manual_control: true,
            ..AdapterConfig::default()
        };
        assert!(matches!(
            KinematicSim::connect(&config),
            Err(SimError::Backend { .. })
        ));
    }

    #[test]
    fn connect_rejects_unknown_map_blocks() {
        let config = AdapterConfig {
            map_name: "Z".to_string(),
            ..AdapterConfig::default()
        };
        assert!(matches!(
            KinematicSim::connect(&config),
            Err(SimError::Backend { .. })
        ));
    }

    // ── Spaces ───────────────────────────────────────────────

    #[test]
    fn spaces_are_valid_before_reset_and_constant() {
        let mut sim = KinematicSim::new("X", 0.1, 0).unwrap();
        let action_space = sim.action_space();
        let obs_space = sim.observation_space();
        assert_eq!(action_space.dim, 2);
        assert_eq!(obs_space.shape, OBS_SHAPE);

        let (obs, _info) = sim.reset(7).unwrap();
        assert_eq!(obs.len(), obs_space.shape);
        let result = sim.step(&forward()).unwrap();
        assert_eq!(result.observation.len(), obs_space.shape);
        assert_eq!(sim.action_space(), action_space);
    }

    // ── Determinism ──────────────────────────────────────────

    #[test]
    fn identical_seeds_give_identical_resets() {
        let mut a = KinematicSim::new("SSS", 0.8, 0).unwrap();
        let mut b = KinematicSim::new("SSS", 0.8, 0).unwrap();
        assert_eq!(a.reset(42).unwrap(), b.reset(42).unwrap());
        assert_eq!(a.vehicle_state(), b.vehicle_state());
    }

    #[test]
    fn different_seeds_give_different_traffic() {
        let mut a = KinematicSim::new("SSS", 1.0, 0).unwrap();
        let mut b = KinematicSim::new("SSS", 1.0, 0).unwrap();
        let (obs_a, _) = a.reset(1).unwrap();
        let (obs_b, _) = b.reset(2).unwrap();
        assert_ne!(obs_a, obs_b, "traffic layout should depend on the seed");
    }

    #[test]
    fn control_inputs_are_clamped_by_the_engine() {
        let mut wild = KinematicSim::new("S", 0.0, 0).unwrap();
        let mut tame = KinematicSim::new("S", 0.0, 0).unwrap();
        wild.reset(0).unwrap();
        tame.reset(0).unwrap();
        let a = wild.step(&Action::new(9.0, 9.0)).unwrap();
        let b = tame.step(&Action::new(1.0, 1.0)).unwrap();
        assert_eq!(a, b, "out-of-range inputs behave like full lock");
    }

    #[test]
    fn malformed_action_is_a_backend_error() {
        let mut sim = KinematicSim::new("S", 0.0, 0).unwrap();
        sim.reset(0).unwrap();
        assert!(matches!(
            sim.step(&Action::from_vec(vec![0.0])),
            Err(SimError::Backend { .. })
        ));
    }

    // ── Episode outcomes ─────────────────────────────────────

    #[test]
    fn forward_drive_arrives_on_an_empty_road() {
        let mut sim = KinematicSim::new("X", 0.0, 0).unwrap();
        sim.reset(0).unwrap();
        let terminal = drive_until_final(&mut sim, forward(), 300);
        assert!(terminal.terminated);
        assert!(terminal.info.arrive_dest);
        assert!(!terminal.info.crash);
        assert!(terminal.reward > 0.0, "arrival carries a bonus");
    }

    #[test]
    fn forward_drive_crashes_into_dense_traffic() {
        let mut sim = KinematicSim::new("SSS", 1.0, 42).unwrap();
        sim.reset(42).unwrap();
        let terminal = drive_until_final(&mut sim, forward(), 1000);
        assert!(terminal.terminated);
        assert!(terminal.info.crash);
        assert!(terminal.reward < 0.0, "crashing carries a penalty");
    }

    #[test]
    fn hard_steering_leaves_the_road() {
        let mut sim = KinematicSim::new("SSSSS", 0.0, 0).unwrap();
        sim.reset(0).unwrap();
        let terminal = drive_until_final(&mut sim, Action::new(1.0, 1.0), 1000);
        assert!(terminal.terminated);
        assert!(terminal.info.out_of_road);
    }

    #[test]
    fn idle_episode_truncates_at_the_horizon() {
        let mut sim = KinematicSim::new("SSSSS", 0.0, 0).unwrap();
        sim.reset(0).unwrap();
        let terminal = drive_until_final(&mut sim, Action::new(0.0, 0.0), 1001);
        assert!(terminal.truncated);
        assert!(!terminal.terminated);
        assert_eq!(terminal.info, StepInfo::default());
    }

    // ── Vehicle state ────────────────────────────────────────

    #[test]
    fn vehicle_state_tracks_motion() {
        let mut sim = KinematicSim::new("S", 0.0, 0).unwrap();
        sim.reset(0).unwrap();
        let before = sim.vehicle_state();
        sim.step(&forward()).unwrap();
        let after = sim.vehicle_state();
        assert!(after.position[0] > before.position[0]);
        assert!(after.velocity[0] > 0.0);
        assert!(after.on_lane);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for k in -8..=8 {
            let angle = 0.3 + k as f64 * PI;
            let wrapped = wrap_angle(angle);
            assert!(wrapped > -PI && wrapped <= PI, "wrap({angle}) = {wrapped}");
        }
    }
}
