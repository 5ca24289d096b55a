//! Connectivity smoke test: construct the backend, reset, take a few
//! seeded-random steps, close. Verifies the whole engine surface works
//! before anything heavier is built on top of it.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use gauntlet_adapter::{AdapterConfig, SimAdapter};
use gauntlet_core::{Action, Simulator};
use gauntlet_sim::KinematicSim;

#[test]
fn raw_engine_smoke() {
    let mut sim = KinematicSim::new("X", 0.1, 0).expect("engine constructs");

    let (obs, _info) = sim.reset(0).expect("reset");
    assert_eq!(obs.len(), sim.observation_space().shape);

    // A few random steps, seeded so the run is reproducible.
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let space = sim.action_space();
    for _ in 0..5 {
        let action = Action::new(
            rng.random_range(space.low..=space.high),
            rng.random_range(space.low..=space.high),
        );
        let result = sim.step(&action).expect("step");
        assert_eq!(result.observation.len(), obs.len());
        assert!(result.reward.is_finite());
        if result.is_final() {
            break;
        }
    }

    sim.close();
}

#[test]
fn adapter_stack_smoke() {
    let config = AdapterConfig {
        map_name: "X".to_string(),
        traffic_density: 0.1,
        ..AdapterConfig::default()
    };
    let mut adapter = SimAdapter::connect(config, KinematicSim::connect).expect("connect");

    let (obs, _info) = adapter.reset(None).expect("reset");
    assert_eq!(obs.len(), adapter.observation_space().expect("space").shape);

    let result = adapter.step(&Action::new(0.0, 0.5)).expect("step");
    assert!(result.reward.is_finite());

    let ego = adapter.ego_state().expect("ego state");
    assert!(ego.speed >= 0.0);

    adapter.close();
    adapter.close(); // idempotent
}
