//! Axis-separated sweeps of a box against the tile grid.

use crate::map::TileMap;
use crate::math::units::world;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    /// Displacement the box may actually make. On a hit this already lands
    /// the box flush against the tile.
    pub allowed: f32,
    pub hit: bool,
    /// Pixel coordinate of the struck tile's leading edge along the axis.
    pub tile_edge: f32,
}

impl Sweep {
    pub fn clear(delta: f32) -> Self {
        Self {
            allowed: delta,
            hit: false,
            tile_edge: 0.0,
        }
    }
}

/// Inclusive range of cells covered by `[start, start + length)`.
fn span(start: f32, length: f32, tile_size: f32) -> (i32, i32) {
    let first = (start / tile_size).floor() as i32;
    let last = ((start + length - 1.0) / tile_size).floor() as i32;
    (first, last)
}

/// Tries to move `bounds` by `delta` along `axis` only.
///
/// If any solid cell overlaps the candidate box, the one closest along the
/// direction of travel decides where the box stops.
pub fn sweep(map: &TileMap, bounds: world::Rect, axis: Axis, delta: f32) -> Sweep {
    if delta == 0.0 {
        return Sweep::clear(delta);
    }

    let tile_size = map.tile_size();
    let offset = match axis {
        Axis::Horizontal => world::Vector2D::new(delta, 0.0),
        Axis::Vertical => world::Vector2D::new(0.0, delta),
    };
    let moved = bounds.translate(offset);

    let (first_col, last_col) = span(moved.min_x(), moved.width(), tile_size);
    let (first_row, last_row) = span(moved.min_y(), moved.height(), tile_size);

    // walk the leading axis in travel order so the nearest blocker wins
    let (lead, cross) = match axis {
        Axis::Horizontal => ((first_col, last_col), (first_row, last_row)),
        Axis::Vertical => ((first_row, last_row), (first_col, last_col)),
    };
    let blocks = |&line: &i32| {
        (cross.0..=cross.1).any(|other| match axis {
            Axis::Horizontal => map.is_solid(line, other),
            Axis::Vertical => map.is_solid(other, line),
        })
    };
    let blocked = if delta > 0.0 {
        (lead.0..=lead.1).find(blocks)
    } else {
        (lead.0..=lead.1).rev().find(blocks)
    };

    let Some(line) = blocked else {
        return Sweep::clear(delta);
    };

    let tile_edge = line as f32 * tile_size;
    let (position, extent) = match axis {
        Axis::Horizontal => (bounds.min_x(), bounds.width()),
        Axis::Vertical => (bounds.min_y(), bounds.height()),
    };

    let flush = if delta > 0.0 {
        tile_edge - extent
    } else {
        tile_edge + tile_size
    };

    Sweep {
        allowed: flush - position,
        hit: true,
        tile_edge,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::map::GridAsset;

    /// 6x4 room, walls on every border.
    fn room() -> TileMap {
        let cells = vec![
            vec![1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1],
        ];
        TileMap::from_grid(&GridAsset { tile_size: 16, cells }).unwrap()
    }

    fn tile_box(x: f32, y: f32) -> world::Rect {
        world::Rect::new(world::Point2D::new(x, y), world::Size2D::new(16.0, 16.0))
    }

    #[test]
    fn stops_flush_against_right_wall() {
        let sweep = sweep(&room(), tile_box(62.0, 16.0), Axis::Horizontal, 3.0);
        assert!(sweep.hit);
        assert_eq!(sweep.tile_edge, 80.0);
        assert_eq!(62.0 + sweep.allowed + 16.0, 80.0);
    }

    #[test]
    fn stops_flush_against_left_wall() {
        let sweep = sweep(&room(), tile_box(17.0, 16.0), Axis::Horizontal, -2.0);
        assert!(sweep.hit);
        assert_eq!(sweep.tile_edge, 0.0);
        assert_eq!(17.0 + sweep.allowed, 16.0);
    }

    #[test]
    fn lands_on_floor_and_bumps_ceiling() {
        let down = sweep(&room(), tile_box(32.0, 30.0), Axis::Vertical, 4.0);
        assert!(down.hit);
        assert_eq!(30.0 + down.allowed, 32.0);

        let up = sweep(&room(), tile_box(32.0, 18.0), Axis::Vertical, -4.0);
        assert!(up.hit);
        assert_eq!(18.0 + up.allowed, 16.0);
    }

    #[test]
    fn touching_is_not_overlapping() {
        // resting on the floor, sliding sideways
        let sweep = sweep(&room(), tile_box(20.0, 32.0), Axis::Horizontal, 1.0);
        assert_eq!(sweep, Sweep::clear(1.0));
    }

    #[test]
    fn nearest_blocker_wins() {
        let cells = vec![vec![0, 0, 1, 1, 0]];
        let map = TileMap::from_grid(&GridAsset { tile_size: 16, cells }).unwrap();

        // candidate box spans cols 1..=3 when 40px wide
        let bounds = world::Rect::new(
            world::Point2D::new(8.0, 0.0),
            world::Size2D::new(40.0, 16.0),
        );
        let right = sweep(&map, bounds, Axis::Horizontal, 8.0);
        assert_eq!(right.tile_edge, 32.0);

        let bounds = world::Rect::new(
            world::Point2D::new(72.0, 0.0),
            world::Size2D::new(24.0, 16.0),
        );
        let left = sweep(&map, bounds, Axis::Horizontal, -24.0);
        assert_eq!(left.tile_edge, 48.0);
        assert_eq!(72.0 + left.allowed, 64.0);

        let cells = vec![vec![0], vec![1], vec![1], vec![0]];
        let map = TileMap::from_grid(&GridAsset { tile_size: 16, cells }).unwrap();

        let bounds = world::Rect::new(world::Point2D::zero(), world::Size2D::new(16.0, 40.0));
        let down = sweep(&map, bounds, Axis::Vertical, 8.0);
        assert_eq!(down.tile_edge, 16.0);
        assert_eq!(down.allowed, -24.0);
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        // even while overlapping a wall nothing is reported
        assert_eq!(sweep(&room(), tile_box(0.0, 0.0), Axis::Vertical, 0.0), Sweep::clear(0.0));
    }

    proptest! {
        #[test]
        fn open_space_allows_the_full_delta(
            x in 16i32..=64,
            y in 16i32..=32,
            delta in -16i32..=16,
        ) {
            let grid = GridAsset {
                tile_size: 16,
                cells: vec![vec![0; 8]; 6],
            };
            let map = TileMap::from_grid(&grid).unwrap();
            let bounds = tile_box(x as f32, y as f32);

            for axis in [Axis::Horizontal, Axis::Vertical] {
                let sweep = sweep(&map, bounds, axis, delta as f32);
                prop_assert!(!sweep.hit);
                prop_assert_eq!(sweep.allowed, delta as f32);
            }
        }
    }
}
