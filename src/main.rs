use std::path::PathBuf;

use airdrop::{
    cgmath::{InnerSpace, Vector2, Vector3},
    config::SceneConfig,
    flow::{DeliveryFlow, FrameInput},
};
use clap::Parser;

/// Headless run of the delivery game: flies over every house and drops a parcel.
#[derive(Parser, Debug)]
#[command(name = "airdrop", version, about)]
struct Cli {
    /// Directory holding the height map and textures
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,
}

/// Horizontal distance under which the autopilot considers itself overhead.
const OVERHEAD: f32 = 0.25;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut flow = DeliveryFlow::load(&cli.assets, SceneConfig::default())?;
    let dt = 1.0 / cli.fps.max(1) as f32;
    let total_frames = (cli.max_seconds / dt) as u64;
    let targets = flow.simulation().targets().len() as u32;
    let mut waypoints: Vec<Vector3<f32>> = flow
        .simulation()
        .targets()
        .iter()
        .map(|t| t.position)
        .rev()
        .collect();

    let mut frame_count = 0u64;
    while frame_count < total_frames {
        frame_count += 1;
        let ship = flow.airship_position();
        let movement = match waypoints.last() {
            Some(goal) => {
                let to_goal = Vector2::new(goal.x - ship.x, goal.z - ship.z);
                if to_goal.magnitude() < OVERHEAD {
                    flow.drop_parcel()?;
                    waypoints.pop();
                    Vector3::new(0.0, 0.0, 0.0)
                } else {
                    // Don't overshoot within a single frame.
                    let reach = flow.config().flight.speed * dt;
                    let scale = (to_goal.magnitude() / reach).min(1.0);
                    let dir = to_goal.normalize() * scale;
                    Vector3::new(dir.x, 0.0, dir.y)
                }
            }
            None => Vector3::new(0.0, 0.0, 0.0),
        };

        let frame = flow.tick(FrameInput { dt, movement });
        if waypoints.is_empty() && flow.simulation().active_parcels().next().is_none() {
            log::info!(
                "All parcels settled after {:.1}s, {} draws in the last frame",
                frame_count as f32 * dt,
                frame.draws.len()
            );
            break;
        }
    }

    log::info!("Final score: {}/{}", flow.score(), targets);
    Ok(())
}
