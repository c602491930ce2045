//! Entity types and geometry. Pure data, no game logic.
//!
//! Everything in the play field is an axis-aligned rectangle measured in
//! logical pixels on a fixed 720x480 field, y growing downward. The session
//! owns the entities; this module only answers geometric questions about them.

use rand::Rng;

// ── Field and entity dimensions (logical pixels) ──────────────────────────────

pub const FIELD_WIDTH: i32 = 720;
pub const FIELD_HEIGHT: i32 = 480;

pub const SHIP_WIDTH: i32 = 44;
pub const SHIP_HEIGHT: i32 = 26;

pub const BULLET_WIDTH: i32 = 4;
pub const BULLET_HEIGHT: i32 = 10;

pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 24;

/// Per-instance enemy fall speed is sampled uniformly from this inclusive
/// range at spawn time.
pub const ENEMY_SPEED_MIN: i32 = 2;
pub const ENEMY_SPEED_MAX: i32 = 4;

// ── Rectangle ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; position is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// True when the x-ranges and y-ranges both overlap (non-empty
    /// intersection; rectangles that merely touch do not intersect).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Entirely above the horizontal line at `bound`.
    pub fn is_fully_above(&self, bound: i32) -> bool {
        self.bottom() < bound
    }

    /// Entirely below the horizontal line at `bound`.
    pub fn is_fully_below(&self, bound: i32) -> bool {
        self.top() > bound
    }

    /// Entirely left of the vertical line at `bound`.
    pub fn is_fully_left_of(&self, bound: i32) -> bool {
        self.right() < bound
    }

    /// Entirely right of the vertical line at `bound`.
    pub fn is_fully_right_of(&self, bound: i32) -> bool {
        self.left() > bound
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    /// Spawn from the ship's muzzle: centered on `center_x`, sitting wholly
    /// above `top`.
    pub fn new(center_x: i32, top: i32) -> Self {
        Bullet {
            rect: Rect::new(
                center_x - BULLET_WIDTH / 2,
                top - BULLET_HEIGHT,
                BULLET_WIDTH,
                BULLET_HEIGHT,
            ),
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub rect: Rect,
    /// Downward movement per tick, fixed for the lifetime of this enemy.
    pub speed: i32,
}

impl Enemy {
    /// Spawn just above the top edge at a uniformly random column with a
    /// uniformly random fall speed. All randomness comes through `rng` so
    /// callers control determinism (seeded RNGs in tests).
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0..=FIELD_WIDTH - ENEMY_WIDTH);
        Enemy {
            rect: Rect::new(x, -ENEMY_HEIGHT, ENEMY_WIDTH, ENEMY_HEIGHT),
            speed: rng.gen_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX),
        }
    }
}

/// The ship's starting rectangle: roughly centered, near the bottom edge.
pub fn starting_ship() -> Rect {
    Rect::new(FIELD_WIDTH / 2 - 20, FIELD_HEIGHT - 60, SHIP_WIDTH, SHIP_HEIGHT)
}
