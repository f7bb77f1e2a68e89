// A read-only tile grid that hands cell rectangles to the collision routines.

use anyhow::{bail, Result};
use hitbox_collision::{Rect, Vec2};

/// Cell value for an empty slot.
pub const EMPTY: i32 = -1;
/// Cell value for a solid tile.
pub const SOLID: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in the direction of an axis-aligned unit normal.
    pub fn offset_by(self, normal: Vec2) -> Self {
        Self::new(self.x + normal.x as i32, self.y + normal.y as i32)
    }
}

/// A solid cell and its world-space box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub pos: TilePosition,
    pub rect: Rect,
}

#[derive(Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<i32>, // row-major, `width * height` entries
    spawn: Option<TilePosition>,
}

impl TileGrid {
    /// Builds a grid from text rows (`#` solid, `.` empty, `P` spawn).
    /// Short rows are padded with empty cells.
    pub fn from_rows(rows: &[String], tile_size: f32) -> Result<Self> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            bail!("tile size must be positive, got {tile_size}");
        }
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = vec![EMPTY; width * height];
        let mut spawn = None;

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => cells[x + y * width] = SOLID,
                    '.' => {}
                    'P' => spawn = Some(TilePosition::new(x as i32, y as i32)),
                    other => bail!("unknown tile {other:?} at column {x}, row {y}"),
                }
            }
        }

        Ok(TileGrid { width, height, tile_size, cells, spawn })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn spawn(&self) -> Option<TilePosition> {
        self.spawn
    }

    /// Size of the whole grid in world units.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * self.tile_size, self.height as f32 * self.tile_size)
    }

    #[inline]
    fn index(&self, pos: TilePosition) -> Option<usize> {
        if pos.x >= 0
            && (pos.x as usize) < self.width
            && pos.y >= 0
            && (pos.y as usize) < self.height
        {
            Some(pos.x as usize + pos.y as usize * self.width)
        } else {
            None
        }
    }

    /// Tile ID at `pos`, or `None` outside the grid.
    pub fn tile_at(&self, pos: TilePosition) -> Option<i32> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn is_solid(&self, pos: TilePosition) -> bool {
        self.tile_at(pos).is_some_and(|id| id != EMPTY)
    }

    pub fn world_to_tile(&self, point: Vec2) -> TilePosition {
        TilePosition::new(
            (point.x / self.tile_size).floor() as i32,
            (point.y / self.tile_size).floor() as i32,
        )
    }

    /// Top-left corner of the cell in world units.
    pub fn tile_to_world(&self, pos: TilePosition) -> Vec2 {
        Vec2::new(pos.x as f32 * self.tile_size, pos.y as f32 * self.tile_size)
    }

    pub fn tile_rect(&self, pos: TilePosition) -> Result<Rect> {
        let corner = self.tile_to_world(pos);
        Ok(Rect::new(corner.x, corner.y, self.tile_size, self.tile_size)?)
    }

    /// Every solid cell whose box touches `area` or lies one cell around it.
    pub fn solid_tiles_near(&self, area: &Rect) -> Result<Vec<Tile>> {
        let min = self.world_to_tile(area.position());
        let max = self.world_to_tile(Vec2::new(area.right(), area.bottom()));

        let mut tiles = Vec::new();
        for y in (min.y - 1)..=(max.y + 1) {
            for x in (min.x - 1)..=(max.x + 1) {
                let pos = TilePosition::new(x, y);
                if self.is_solid(pos) {
                    tiles.push(Tile { pos, rect: self.tile_rect(pos)? });
                }
            }
        }
        Ok(tiles)
    }

    /// Every solid cell in the grid, row by row.
    pub fn solid_tiles(&self) -> Result<Vec<Tile>> {
        let mut tiles = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = TilePosition::new(x, y);
                if self.is_solid(pos) {
                    tiles.push(Tile { pos, rect: self.tile_rect(pos)? });
                }
            }
        }
        Ok(tiles)
    }

    /// A face is exposed when the cell it faces is not solid. Contacts on
    /// covered faces are seams between neighbouring tiles and get ignored.
    pub fn is_face_exposed(&self, pos: TilePosition, normal: Vec2) -> bool {
        normal.is_zero() || !self.is_solid(pos.offset_by(normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_from_rows() {
        let grid = TileGrid::from_rows(&rows(&["#..", "#P#", "###"]), 10.0).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.spawn(), Some(TilePosition::new(1, 1)));
        assert_eq!(grid.tile_at(TilePosition::new(0, 0)), Some(SOLID));
        assert_eq!(grid.tile_at(TilePosition::new(1, 0)), Some(EMPTY));
        assert_eq!(grid.tile_at(TilePosition::new(1, 1)), Some(EMPTY));
        assert_eq!(grid.tile_at(TilePosition::new(3, 0)), None);
        assert_eq!(grid.tile_at(TilePosition::new(0, -1)), None);
        assert_eq!(grid.world_size(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let grid = TileGrid::from_rows(&rows(&["#", "###"]), 8.0).unwrap();
        assert_eq!(grid.width(), 3);
        assert!(!grid.is_solid(TilePosition::new(2, 0)));
        assert!(grid.is_solid(TilePosition::new(2, 1)));
    }

    #[test]
    fn test_from_rows_rejects_unknown_tile() {
        assert!(TileGrid::from_rows(&rows(&["#x#"]), 8.0).is_err());
        assert!(TileGrid::from_rows(&rows(&["###"]), 0.0).is_err());
    }

    #[test]
    fn test_world_tile_conversion() {
        let grid = TileGrid::from_rows(&rows(&["....", "...."]), 16.0).unwrap();
        assert_eq!(grid.world_to_tile(Vec2::new(0.0, 0.0)), TilePosition::new(0, 0));
        assert_eq!(grid.world_to_tile(Vec2::new(15.9, 16.0)), TilePosition::new(0, 1));
        assert_eq!(grid.world_to_tile(Vec2::new(-0.1, 40.0)), TilePosition::new(-1, 2));
        assert_eq!(grid.tile_to_world(TilePosition::new(3, 1)), Vec2::new(48.0, 16.0));
        assert_eq!(
            grid.tile_rect(TilePosition::new(1, 1)).unwrap(),
            Rect::new(16.0, 16.0, 16.0, 16.0).unwrap()
        );
    }

    #[test]
    fn test_solid_tiles_near() {
        let grid = TileGrid::from_rows(
            &rows(&["#.........", "..........", "......####"]),
            10.0,
        )
        .unwrap();
        let area = Rect::new(61.0, 5.0, 8.0, 8.0).unwrap();
        let near: Vec<TilePosition> =
            grid.solid_tiles_near(&area).unwrap().iter().map(|t| t.pos).collect();
        assert_eq!(
            near,
            vec![TilePosition::new(6, 2), TilePosition::new(7, 2)]
        );
        assert_eq!(grid.solid_tiles().unwrap().len(), 5);
    }

    #[test]
    fn test_is_face_exposed() {
        let grid = TileGrid::from_rows(&rows(&["...", "##.", "..."]), 10.0).unwrap();
        let left = TilePosition::new(0, 1);
        let right = TilePosition::new(1, 1);
        assert!(grid.is_face_exposed(right, Vec2::UP));
        assert!(grid.is_face_exposed(right, Vec2::RIGHT));
        assert!(!grid.is_face_exposed(right, Vec2::LEFT));
        assert!(!grid.is_face_exposed(left, Vec2::RIGHT));
        assert!(grid.is_face_exposed(left, Vec2::ZERO));
    }
}
