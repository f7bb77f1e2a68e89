//! Demo settings, loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use hitbox_collision::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which collision routine moves the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Continuous sweep against each nearby tile, nearest contact first.
    #[default]
    Swept,
    /// Per-axis clamp of the frame's displacement against each nearby tile.
    Discrete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Edge length of one grid cell, in pixels.
    pub tile_size: f32,
    /// Downward acceleration, px/s^2.
    pub gravity: f32,
    /// Horizontal speed while a direction is held, px/s.
    pub run_speed: f32,
    /// Upward speed applied on jump, px/s.
    pub jump_speed: f32,
    /// Frames simulated by the headless run.
    pub headless_frames: u32,
    pub player_size: Vec2,
    /// Explicit spawn box. When absent the player starts on the `P` cell.
    pub spawn: Option<Rect>,
    pub resolver: ResolveMode,
    /// Level rows: `#` solid, `.` empty, `P` spawn.
    pub level: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            tile_size: 32.0,
            gravity: 1200.0,
            run_speed: 180.0,
            jump_speed: 520.0,
            headless_frames: 240,
            player_size: Vec2::new(20.0, 28.0),
            spawn: None,
            resolver: ResolveMode::Swept,
            level: [
                "####################",
                "#..................#",
                "#..................#",
                "#.......####.......#",
                "#..................#",
                "#..P..........#....#",
                "#............##....#",
                "#######...######.###",
                "####################",
            ]
            .iter()
            .map(|row| row.to_string())
            .collect(),
        }
    }
}

impl DemoConfig {
    /// Reads the config at `path`, or returns the defaults when no path is
    /// given. Missing fields fall back to their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let config: DemoConfig = serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                info!(path = %path.display(), "loaded demo config");
                config
            }
            None => DemoConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tile_size.is_finite() && self.tile_size > 0.0,
            "tile_size must be positive, got {}",
            self.tile_size
        );
        ensure!(
            self.player_size.x > 0.0 && self.player_size.y > 0.0,
            "player_size must be positive, got {:?}",
            self.player_size
        );
        ensure!(!self.level.is_empty(), "level has no rows");
        ensure!(
            self.gravity.is_finite() && self.run_speed.is_finite() && self.jump_speed.is_finite(),
            "speeds must be finite"
        );
        Ok(())
    }
}
