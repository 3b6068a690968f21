//! Brick layouts
//!
//! A level arrives as a grid of tile codes from an external loader:
//! - `0`: empty
//! - `1`: solid (indestructible) brick
//! - `2..=5`: destructible brick, code picks the colour
//!
//! Unknown codes are treated as plain destructible bricks.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::body::Rect;

/// Colour of solid bricks
pub const SOLID_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Palette for destructible tile codes 2..=5
const PALETTE: [Vec3; 4] = [
    Vec3::new(0.2, 0.6, 1.0),
    Vec3::new(0.0, 0.7, 0.0),
    Vec3::new(0.8, 0.8, 0.4),
    Vec3::new(1.0, 0.5, 0.0),
];

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Vec3,
    /// Indestructible: the ball bounces off but never breaks it
    pub solid: bool,
    pub destroyed: bool,
}

impl Brick {
    /// Whether this brick still takes part in collision queries
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.destroyed
    }
}

/// A level: the bricks laid out from one tile grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Brick>,
}

impl Level {
    /// Lay out bricks from a tile grid to fill `width` x `height`.
    ///
    /// Returns `None` for an empty or ragged grid.
    pub fn from_tiles(tiles: &[Vec<u8>], width: f32, height: f32) -> Option<Self> {
        let rows = tiles.len();
        let columns = tiles.first()?.len();
        if columns == 0 || tiles.iter().any(|row| row.len() != columns) {
            return None;
        }

        let unit = Vec2::new(width / columns as f32, height / rows as f32);
        let mut bricks = Vec::new();

        for (y, row) in tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let position = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                let (solid, color) = match code {
                    1 => (true, SOLID_COLOR),
                    2..=5 => (false, PALETTE[(code - 2) as usize]),
                    _ => (false, Vec3::ONE),
                };
                bricks.push(Brick {
                    rect: Rect::new(position, unit),
                    color,
                    solid,
                    destroyed: false,
                });
            }
        }

        Some(Self { bricks })
    }

    /// All destructible bricks are gone.
    ///
    /// A grid with only solid bricks counts as completed from the start.
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Bring every brick back
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }

    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.solid && !b.destroyed).count()
    }

    /// Bricks still in play
    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Vec<u8>> {
        vec![vec![1, 1, 1, 1], vec![2, 0, 3, 4], vec![5, 5, 0, 0]]
    }

    #[test]
    fn test_layout_fills_area() {
        let level = Level::from_tiles(&grid(), 800.0, 300.0).unwrap();
        assert_eq!(level.bricks.len(), 9);

        let last = level.bricks.last().unwrap();
        assert_eq!(last.rect.position, Vec2::new(200.0, 200.0));
        assert_eq!(last.rect.size, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_solid_and_destructible_codes() {
        let level = Level::from_tiles(&grid(), 800.0, 300.0).unwrap();
        assert_eq!(level.bricks.iter().filter(|b| b.solid).count(), 4);
        assert_eq!(level.remaining(), 5);
        assert_eq!(level.bricks[4].color, PALETTE[0]);
    }

    #[test]
    fn test_completion_ignores_solid() {
        let mut level = Level::from_tiles(&grid(), 800.0, 300.0).unwrap();
        assert!(!level.is_completed());
        for brick in level.bricks.iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());
        assert_eq!(level.active_bricks().count(), 4);

        level.reset();
        assert_eq!(level.remaining(), 5);
    }

    #[test]
    fn test_all_solid_level_is_completed() {
        let level = Level::from_tiles(&[vec![1, 0, 1]], 800.0, 100.0).unwrap();
        assert_eq!(level.remaining(), 0);
        assert!(level.is_completed());
    }

    #[test]
    fn test_bad_grids_rejected() {
        assert!(Level::from_tiles(&[], 800.0, 300.0).is_none());
        assert!(Level::from_tiles(&[vec![]], 800.0, 300.0).is_none());
        assert!(Level::from_tiles(&[vec![1, 2], vec![1]], 800.0, 300.0).is_none());
    }
}
