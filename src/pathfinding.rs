use std::cmp::Reverse;
use std::collections::BinaryHeap;

use smallvec::SmallVec;

use crate::components::Position;

/// Weight of an orthogonal step.
pub const CARDINAL_COST: i32 = 2;
/// Weight of a diagonal step; more than a cardinal one, less than two.
pub const DIAGONAL_COST: i32 = 3;

const DIRS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Per-cell entry cost. 0 or negative means impassable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    width: usize,
    height: usize,
    costs: Vec<i32>,
}

impl CostGrid {
    /// Walkable cells cost 1, everything else is impassable.
    pub fn from_walkable(width: usize, height: usize, walkable: &[bool]) -> Self {
        let mut costs = vec![0; width * height];
        for (c, &w) in costs.iter_mut().zip(walkable) {
            *c = i32::from(w);
        }
        Self {
            width,
            height,
            costs,
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cost of entering `pos`; 0 when out of bounds.
    pub fn get(&self, pos: Position) -> i32 {
        self.index(pos).map_or(0, |i| self.costs[i])
    }

    pub fn set(&mut self, pos: Position, cost: i32) {
        if let Some(i) = self.index(pos) {
            self.costs[i] = cost;
        }
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos) > 0
    }

    /// Adjust the cost of a passable cell. Walls stay walls and a passable
    /// cell never drops below cost 1.
    pub fn add_penalty(&mut self, pos: Position, penalty: i32) {
        if let Some(i) = self.index(pos)
            && self.costs[i] > 0
        {
            self.costs[i] = self.costs[i].saturating_add(penalty).max(1);
        }
    }

    fn neighbors(&self, pos: Position) -> SmallVec<[(Position, i32); 8]> {
        DIRS.iter()
            .filter_map(|&(dx, dy)| {
                let next = pos.offset(dx, dy);
                let cost = self.get(next);
                if cost <= 0 {
                    return None;
                }
                let step = if dx != 0 && dy != 0 {
                    DIAGONAL_COST
                } else {
                    CARDINAL_COST
                };
                Some((next, cost.saturating_mul(step)))
            })
            .collect()
    }
}

/// Lower bound on the remaining cost: every cell costs at least 1.
fn octile(a: Position, b: Position) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + CARDINAL_COST * (hi - lo)
}

/// Cheapest 8-directional route from `start` to `goal`, excluding `start`
/// and ending with `goal`. Empty when the goal is unreachable, impassable,
/// or equal to the start. The start cell itself may be impassable.
pub fn path_to(grid: &CostGrid, start: Position, goal: Position) -> Vec<Position> {
    let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
        return Vec::new();
    };
    if start_idx == goal_idx || !grid.is_passable(goal) {
        return Vec::new();
    }

    let size = grid.width * grid.height;
    let mut best = vec![i64::MAX; size];
    let mut came_from: Vec<Option<usize>> = vec![None; size];
    let mut open = BinaryHeap::new();

    best[start_idx] = 0;
    open.push(Reverse((i64::from(octile(start, goal)), 0, start_idx)));

    while let Some(Reverse((_, g, idx))) = open.pop() {
        if idx == goal_idx {
            break;
        }
        if g > best[idx] {
            continue; // stale heap entry
        }
        let here = Position::new((idx % grid.width) as i32, (idx / grid.width) as i32);
        for (next, step) in grid.neighbors(here) {
            let Some(next_idx) = grid.index(next) else {
                continue;
            };
            let tentative = g + i64::from(step);
            if tentative < best[next_idx] {
                best[next_idx] = tentative;
                came_from[next_idx] = Some(idx);
                open.push(Reverse((
                    tentative + i64::from(octile(next, goal)),
                    tentative,
                    next_idx,
                )));
            }
        }
    }

    if best[goal_idx] == i64::MAX {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut cursor = goal_idx;
    while cursor != start_idx {
        path.push(Position::new(
            (cursor % grid.width) as i32,
            (cursor / grid.width) as i32,
        ));
        match came_from[cursor] {
            Some(prev) => cursor = prev,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
