use anyhow::{Context, Result};
use hitbox_collision::Rect;
use tracing::info;

use crate::config::DemoConfig;
use crate::player::{Input, Player};
use crate::tile_grid::TileGrid;

/// The grid and the one moving box that lives in it.
pub struct Level {
    pub grid: TileGrid,
    pub player: Player,
    pub config: DemoConfig,
}

impl Level {
    pub fn from_config(config: DemoConfig) -> Result<Self> {
        let grid = TileGrid::from_rows(&config.level, config.tile_size)?;

        let bounds = match config.spawn {
            Some(rect) => rect,
            None => {
                let spawn = grid.spawn().context("level has no `P` cell and no spawn rect")?;
                // Stand on the bottom edge of the spawn cell, centered.
                let corner = grid.tile_to_world(spawn);
                let tile = grid.tile_size();
                let size = config.player_size;
                Rect::new(
                    corner.x + (tile - size.x) * 0.5,
                    corner.y + tile - size.y,
                    size.x,
                    size.y,
                )?
            }
        };

        info!(
            width = grid.width(),
            height = grid.height(),
            resolver = ?config.resolver,
            "level ready, player at ({:.1}, {:.1})",
            bounds.x(),
            bounds.y()
        );

        Ok(Level { grid, player: Player::new(bounds), config })
    }

    pub fn step(&mut self, input: Input, dt: f32) -> Result<()> {
        self.player.step(&self.grid, input, &self.config, dt)
    }
}
