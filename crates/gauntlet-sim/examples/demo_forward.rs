//! Gauntlet demo: drive forward for 100 steps and print ego state.
//!
//! Demonstrates:
//!   1. Building an adapter configuration
//!   2. Connecting the adapter to the kinematic backend
//!   3. Querying action/observation spaces before any reset
//!   4. Resetting, stepping, and extracting structured ego state
//!   5. Closing the adapter when done
//!
//! Run with:
//!   cargo run --example demo_forward -- --no-render

use gauntlet_adapter::{AdapterConfig, SimAdapter};
use gauntlet_core::Action;
use gauntlet_sim::KinematicSim;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let no_render = std::env::args().any(|a| a == "--no-render");

    let config = AdapterConfig {
        use_render: !no_render,
        manual_control: false,
        map_name: "X".to_string(),
        start_seed: 42,
        num_scenarios: 1,
        traffic_density: 0.1,
    };

    let render_status = if no_render { "disabled" } else { "enabled" };
    println!("Creating adapter (rendering {render_status})");
    let mut adapter = SimAdapter::connect(config, KinematicSim::connect)?;
    println!("Action space: {}", adapter.action_space()?);
    println!("Observation space shape: {}\n", adapter.observation_space()?);

    println!("Resetting environment...");
    let (obs, _info) = adapter.reset(None)?;
    println!("Initial observation length: {}\n", obs.len());

    let ego = adapter.ego_state()?;
    println!("Initial ego state:");
    println!("  Position: x={:.2}, y={:.2}", ego.position.x, ego.position.y);
    println!("  Speed: {:.2} m/s", ego.speed);
    println!("  Heading: {:.2} rad\n", ego.heading);

    println!("Driving forward for 100 steps\n");
    for step in 1..=100 {
        // Simple forward action: no steering, constant throttle.
        let result = adapter.step(&Action::new(0.0, 0.5))?;

        if step % 10 == 0 {
            let ego = adapter.ego_state()?;
            println!(
                "Step {step:3}: pos=({:6.2}, {:6.2}), speed={:5.2} m/s, reward={:6.3}, on_lane={}",
                ego.position.x, ego.position.y, ego.speed, result.reward, ego.on_lane
            );
        }

        if result.is_final() {
            println!("\nEpisode ended at step {step}");
            println!("  Terminated: {}", result.terminated);
            println!("  Truncated: {}", result.truncated);
            if result.info.crash {
                println!("  Crash detected!");
            }
            if result.info.arrive_dest {
                println!("  Reached destination!");
            }
            break;
        }
    }

    let ego = adapter.ego_state()?;
    println!("\nFinal ego state:");
    println!("  Position: x={:.2}, y={:.2}", ego.position.x, ego.position.y);
    println!("  Speed: {:.2} m/s", ego.speed);
    println!("  Heading: {:.2} rad", ego.heading);

    adapter.close();
    println!("\nDemo complete");
    Ok(())
}
