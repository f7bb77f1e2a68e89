use anyhow::Result;
use hitbox_collision::{resolve_axis_move, resolve_sweep, sweep_test, Contact, Rect, Vec2};
use tracing::debug;

use crate::config::{DemoConfig, ResolveMode};
use crate::tile_grid::{Tile, TileGrid};

/// Buttons held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Input {
    fn horizontal(self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Exact resting coordinates found while resolving one frame. Applying them
/// after integration removes the rounding left over from `velocity * t`.
#[derive(Debug, Default)]
struct Snap {
    x: Option<f32>,
    y: Option<f32>,
    landed: bool,
}

impl Snap {
    fn record(&mut self, mover: &Rect, tile: &Rect, normal: Vec2) {
        if normal == Vec2::LEFT {
            self.x = Some(tile.x() - mover.w());
        } else if normal == Vec2::RIGHT {
            self.x = Some(tile.right());
        } else if normal == Vec2::UP {
            self.y = Some(tile.y() - mover.h());
            self.landed = true;
        } else if normal == Vec2::DOWN {
            self.y = Some(tile.bottom());
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub bounds: Rect,
    /// px/s
    pub velocity: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn new(bounds: Rect) -> Self {
        Player { bounds, velocity: Vec2::ZERO, on_ground: false }
    }

    /// Advances the player by `dt` seconds through `grid`.
    ///
    /// Velocity is settled against the tiles before the position is
    /// integrated.
    pub fn step(
        &mut self,
        grid: &TileGrid,
        input: Input,
        config: &DemoConfig,
        dt: f32,
    ) -> Result<()> {
        self.velocity.x = input.horizontal() * config.run_speed;
        if input.jump && self.on_ground {
            self.velocity.y = -config.jump_speed;
        }
        self.velocity.y += config.gravity * dt;

        let displacement = self.velocity * dt;
        let area = travel_area(&self.bounds, displacement)?;
        let nearby = grid.solid_tiles_near(&area)?;

        let (resolved, snap) = match config.resolver {
            ResolveMode::Swept => resolve_swept(&self.bounds, displacement, &nearby, grid),
            ResolveMode::Discrete => resolve_discrete(&self.bounds, displacement, &nearby),
        };

        let moved = self.bounds.translated(resolved.x, resolved.y);
        self.bounds = Rect::new(
            snap.x.unwrap_or(moved.x()),
            snap.y.unwrap_or(moved.y()),
            moved.w(),
            moved.h(),
        )?;

        if snap.x.is_some() {
            self.velocity.x = 0.0;
        }
        if snap.y.is_some() {
            self.velocity.y = 0.0;
        }
        self.on_ground = snap.landed;
        Ok(())
    }
}

/// The box covering `bounds` at both ends of `displacement`.
fn travel_area(bounds: &Rect, displacement: Vec2) -> Result<Rect> {
    Ok(Rect::new(
        bounds.x().min(bounds.x() + displacement.x),
        bounds.y().min(bounds.y() + displacement.y),
        bounds.w() + displacement.x.abs(),
        bounds.h() + displacement.y.abs(),
    )?)
}

/// Sweeps against every nearby tile, nearest contact first, re-testing each
/// one with the displacement left over from the earlier ones.
fn resolve_swept(
    mover: &Rect,
    displacement: Vec2,
    tiles: &[Tile],
    grid: &TileGrid,
) -> (Vec2, Snap) {
    let mut contacts: Vec<(Contact, &Tile)> = tiles
        .iter()
        .filter_map(|tile| sweep_test(mover, displacement, &tile.rect).map(|c| (c, tile)))
        .collect();
    contacts.sort_by(|a, b| a.0.time.total_cmp(&b.0.time));

    let mut resolved = displacement;
    let mut snap = Snap::default();
    for (_, tile) in contacts {
        let Some(contact) = sweep_test(mover, resolved, &tile.rect) else {
            continue;
        };
        if !grid.is_face_exposed(tile.pos, contact.normal) {
            continue;
        }
        if let Some(velocity) = resolve_sweep(mover, resolved, &tile.rect) {
            debug!(
                tile = ?tile.pos,
                time = contact.time,
                normal = ?contact.normal,
                "swept contact"
            );
            resolved = velocity;
            snap.record(mover, &tile.rect, contact.normal);
        }
    }
    (resolved, snap)
}

fn resolve_discrete(mover: &Rect, displacement: Vec2, tiles: &[Tile]) -> (Vec2, Snap) {
    let mut resolved = displacement;
    let mut snap = Snap::default();
    for tile in tiles {
        let before = resolved;
        resolved = resolve_axis_move(mover, &tile.rect, resolved);
        if resolved.x != before.x {
            let normal = if before.x > 0.0 { Vec2::LEFT } else { Vec2::RIGHT };
            snap.record(mover, &tile.rect, normal);
        }
        if resolved.y != before.y {
            let normal = if before.y > 0.0 { Vec2::UP } else { Vec2::DOWN };
            snap.record(mover, &tile.rect, normal);
        }
    }
    (resolved, snap)
}
