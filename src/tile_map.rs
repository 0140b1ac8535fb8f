use crate::color;
use crate::components::Rgb;

/// One drawable cell: character, foreground, background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Graphic {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Drawn for cells that were never seen.
pub const SHROUD: Graphic = Graphic {
    ch: ' ',
    fg: color::WHITE,
    bg: color::BLACK,
};

/// Static per-kind tile attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    pub dark: Graphic,
    pub light: Graphic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Wall,
    Floor,
}

impl TileKind {
    pub fn tile(self) -> Tile {
        match self {
            TileKind::Wall => Tile {
                walkable: false,
                transparent: false,
                dark: Graphic {
                    ch: '#',
                    fg: color::WHITE,
                    bg: color::WALL_DARK,
                },
                light: Graphic {
                    ch: '#',
                    fg: color::WHITE,
                    bg: color::WALL_LIGHT,
                },
            },
            TileKind::Floor => Tile {
                walkable: true,
                transparent: true,
                dark: Graphic {
                    ch: '.',
                    fg: color::WHITE,
                    bg: color::FLOOR_DARK,
                },
                light: Graphic {
                    ch: '.',
                    fg: color::WHITE,
                    bg: color::FLOOR_LIGHT,
                },
            },
        }
    }

    pub fn walkable(self) -> bool {
        self.tile().walkable
    }

    pub fn transparent(self) -> bool {
        self.tile().transparent
    }
}

/// Fixed-size tile grid plus the per-turn `visible` and the sticky
/// `explored` masks, all row-major and of identical dimensions.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: usize,
    height: usize,
    kinds: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
}

impl TileMap {
    /// A grid of solid wall, nothing seen yet.
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            kinds: vec![TileKind::Wall; size],
            visible: vec![false; size],
            explored: vec![false; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get_kind(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|i| self.kinds[i])
    }

    pub fn set_kind(&mut self, x: i32, y: i32, kind: TileKind) {
        if let Some(i) = self.index(x, y) {
            self.kinds[i] = kind;
        }
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_kind(x, y).is_some_and(TileKind::walkable)
    }

    /// Out-of-bounds cells are opaque.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.get_kind(x, y).is_some_and(TileKind::transparent)
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.visible[i])
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.explored[i])
    }

    /// Replace the visibility mask and fold it into `explored`.
    /// A mask of the wrong size is ignored.
    pub fn set_visible(&mut self, mask: Vec<bool>) {
        if mask.len() != self.visible.len() {
            log::warn!(
                "visibility mask has {} cells, map has {}; ignoring",
                mask.len(),
                self.visible.len()
            );
            return;
        }
        for (explored, &seen) in self.explored.iter_mut().zip(&mask) {
            *explored |= seen;
        }
        self.visible = mask;
    }

    pub fn clear_visible(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }

    /// Row-major walkability flags, the seed for path cost grids.
    pub fn walkable_mask(&self) -> Vec<bool> {
        self.kinds.iter().map(|k| k.walkable()).collect()
    }
}
