//! Recursive shadowcasting field of view.
//!
//! Opaque cells are themselves visible but hide everything behind them.
//! Cells outside the grid are treated as opaque.

use crate::components::Position;
use crate::tile_map::TileMap;

// Octant transforms: (xx, xy, yx, yy) per octant.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

struct Grid<'a, F> {
    width: usize,
    height: usize,
    origin: Position,
    radius: i32,
    is_transparent: &'a F,
    visible: Vec<bool>,
}

impl<F> Grid<'_, F>
where
    F: Fn(i32, i32) -> bool,
{
    fn mark(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.visible[y as usize * self.width + x as usize] = true;
        }
    }

    fn blocks(&self, x: i32, y: i32) -> bool {
        !(self.is_transparent)(x, y)
    }
}

/// Parameters for a single recursive shadowcast invocation.
#[derive(Clone, Copy)]
struct Scan {
    row: i32,
    start_slope: f64,
    end_slope: f64,
    transform: (i32, i32, i32, i32),
}

fn cast_light<F>(grid: &mut Grid<'_, F>, scan: Scan)
where
    F: Fn(i32, i32) -> bool,
{
    let Scan {
        row,
        mut start_slope,
        end_slope,
        transform: (xx, xy, yx, yy),
    } = scan;
    if start_slope < end_slope {
        return;
    }

    let radius_sq = grid.radius.saturating_mul(grid.radius);
    let mut next_start_slope = start_slope;

    for j in row..=grid.radius {
        let dy = -j;
        let mut blocked = false;

        for dx in -j..=0 {
            let l_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let r_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);
            if start_slope < r_slope {
                continue;
            }
            if end_slope > l_slope {
                break;
            }

            let x = grid.origin.x + dx * xx + dy * xy;
            let y = grid.origin.y + dx * yx + dy * yy;

            if dx * dx + dy * dy <= radius_sq {
                grid.mark(x, y);
            }

            if blocked {
                if grid.blocks(x, y) {
                    next_start_slope = r_slope;
                } else {
                    blocked = false;
                    start_slope = next_start_slope;
                }
            } else if grid.blocks(x, y) && j < grid.radius {
                blocked = true;
                cast_light(
                    grid,
                    Scan {
                        row: j + 1,
                        start_slope,
                        end_slope: l_slope,
                        transform: scan.transform,
                    },
                );
                next_start_slope = r_slope;
            }
        }

        if blocked {
            break;
        }
    }
}

/// Row-major visibility grid of `width × height` as seen from `origin`.
/// A radius of 0 or less sees only the origin cell; anything past the map's
/// extent behaves like a radius covering the whole map.
pub fn compute_fov<F>(
    width: usize,
    height: usize,
    origin: Position,
    radius: i32,
    is_transparent: F,
) -> Vec<bool>
where
    F: Fn(i32, i32) -> bool,
{
    let radius = radius.min(i32::try_from(width + height).unwrap_or(i32::MAX));
    let mut grid = Grid {
        width,
        height,
        origin,
        radius,
        is_transparent: &is_transparent,
        visible: vec![false; width * height],
    };
    grid.mark(origin.x, origin.y);

    if radius > 0 {
        for transform in OCTANTS {
            cast_light(
                &mut grid,
                Scan {
                    row: 1,
                    start_slope: 1.0,
                    end_slope: 0.0,
                    transform,
                },
            );
        }
    }

    grid.visible
}

/// FOV over a tile map's transparency.
pub fn compute_tile_fov(tiles: &TileMap, origin: Position, radius: i32) -> Vec<bool> {
    compute_fov(tiles.width(), tiles.height(), origin, radius, |x, y| {
        tiles.is_transparent(x, y)
    })
}
