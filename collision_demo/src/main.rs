use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod level;
mod player;
mod tile_grid;
mod visual;

use config::DemoConfig;
use level::Level;
use player::Input;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let visual = args.first().is_some_and(|arg| arg == "visual");
    let config_path = if visual { args.get(1) } else { args.first() };

    let config = DemoConfig::load(config_path.map(Path::new))?;
    let level = Level::from_config(config)?;

    if visual {
        return visual::run_visual(level).map_err(|e| anyhow!("visual demo failed: {e}"));
    }
    run_headless(level)
}

/// Input for frame `frame` of the headless script: run right, hop twice,
/// then run back left.
fn scripted_input(frame: u32) -> Input {
    match frame {
        0..=29 => Input::default(),
        30..=119 => Input { right: true, jump: frame == 60 || frame == 100, ..Input::default() },
        _ => Input { left: true, jump: frame == 160, ..Input::default() },
    }
}

fn run_headless(mut level: Level) -> Result<()> {
    let dt = 1.0 / 60.0;
    let frames = level.config.headless_frames;
    info!(frames, "running headless");

    for frame in 0..frames {
        level.step(scripted_input(frame), dt)?;
        if frame % 10 == 0 {
            let player = &level.player;
            info!(
                frame,
                on_ground = player.on_ground,
                "player at ({:.2}, {:.2}) velocity ({:.1}, {:.1})",
                player.bounds.x(),
                player.bounds.y(),
                player.velocity.x,
                player.velocity.y
            );
        }
    }

    let bounds = level.player.bounds;
    info!("finished at ({:.2}, {:.2})", bounds.x(), bounds.y());
    Ok(())
}
