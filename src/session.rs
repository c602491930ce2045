//! The session state machine: one fixed-order tick at a time.
//!
//! `Session::advance` is the only mutating entry point. It is deterministic
//! given the sampled intents, the elapsed time, the tick clock, and the
//! injected RNG, which is what makes the whole simulation testable without
//! a terminal or a wall clock.

use rand::Rng;

use crate::entities::{
    starting_ship, Bullet, Enemy, Rect, FIELD_HEIGHT, FIELD_WIDTH,
};

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Horizontal ship movement per tick while a direction is held.
pub const SHIP_SPEED: i32 = 6;

/// Upward bullet movement per tick.
pub const BULLET_SPEED: i32 = 10;

/// Minimum interval between shots, in the caller's tick clock.
pub const SHOT_COOLDOWN_MS: u64 = 220;

/// Elapsed time that must accumulate before the next enemy appears.
pub const SPAWN_INTERVAL_MS: u64 = 800;

/// Score awarded per enemy destroyed.
pub const KILL_REWARD: u32 = 10;

// ── Public types ──────────────────────────────────────────────────────────────

/// Coarse session state. `Ended` is terminal; construct a new `Session`
/// to play again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Ended,
}

/// Discrete intents sampled from current input device state once per tick.
/// These are level-sampled, not edge-triggered: a held key re-applies its
/// effect every tick (firing is additionally rate-limited by the cooldown).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// What one tick produced, carrying the score either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Continue(u32),
    GameOver(u32),
}

/// One play session from launch to game over.
#[derive(Clone, Debug)]
pub struct Session {
    pub ship: Rect,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Tick-clock timestamp of the most recent shot.
    pub last_shot_ms: u64,
    /// Elapsed time banked toward the next enemy spawn. Fully reset on
    /// trigger, so a burst of elapsed time yields at most one spawn per tick.
    pub spawn_accumulator_ms: u64,
    pub phase: Phase,
}

impl Session {
    /// Fresh session: centered ship, empty field, zero score.
    pub fn new() -> Self {
        Session {
            ship: starting_ship(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            last_shot_ms: 0,
            spawn_accumulator_ms: 0,
            phase: Phase::Active,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// `elapsed_ms` is wall-clock time since the previous tick; `now_ms` is
    /// the current reading of the same monotonic clock, used for the shot
    /// cooldown. Step order is fixed: movement, firing, spawn timer, bullet
    /// advance, enemy advance + ship collision, bullet/enemy pairing.
    ///
    /// Once the session has ended this mutates nothing and keeps returning
    /// `GameOver` with the final score.
    pub fn advance(
        &mut self,
        intents: &Intents,
        elapsed_ms: u64,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> SessionEvent {
        if self.phase == Phase::Ended {
            return SessionEvent::GameOver(self.score);
        }

        // ── 1. Movement ──────────────────────────────────────────────────────
        // The boundary test runs on the pre-move position, so a ship right at
        // the edge still takes a full step and can overshoot the field by up
        // to one step.
        if intents.move_left && self.ship.left() > 0 {
            self.ship.x -= SHIP_SPEED;
        }
        if intents.move_right && self.ship.right() < FIELD_WIDTH {
            self.ship.x += SHIP_SPEED;
        }

        // ── 2. Firing (cooldown-gated) ───────────────────────────────────────
        if intents.fire && now_ms.saturating_sub(self.last_shot_ms) >= SHOT_COOLDOWN_MS {
            self.bullets
                .push(Bullet::new(self.ship.center_x(), self.ship.top()));
            self.last_shot_ms = now_ms;
        }

        // ── 3. Spawn timer ───────────────────────────────────────────────────
        self.spawn_accumulator_ms += elapsed_ms;
        if self.spawn_accumulator_ms >= SPAWN_INTERVAL_MS {
            self.enemies.push(Enemy::spawn(rng));
            self.spawn_accumulator_ms = 0;
        }

        // ── 4. Bullet advance ────────────────────────────────────────────────
        for bullet in &mut self.bullets {
            bullet.rect.y -= BULLET_SPEED;
        }
        self.bullets.retain(|b| !b.rect.is_fully_above(0));

        // ── 5. Enemy advance and ship collision ──────────────────────────────
        for enemy in &mut self.enemies {
            enemy.rect.y += enemy.speed;
        }
        self.enemies.retain(|e| !e.rect.is_fully_below(FIELD_HEIGHT));

        if self.enemies.iter().any(|e| e.rect.intersects(&self.ship)) {
            self.phase = Phase::Ended;
            return SessionEvent::GameOver(self.score);
        }

        // ── 6. Bullet/enemy pairing ──────────────────────────────────────────
        // Collect removal indices during the scan, apply them afterwards.
        // Each bullet claims at most the first enemy it overlaps, and an
        // enemy already claimed this tick is not eligible again.
        let mut used_bullets: Vec<usize> = Vec::new();
        let mut killed_enemies: Vec<usize> = Vec::new();

        for (bi, bullet) in self.bullets.iter().enumerate() {
            for (ei, enemy) in self.enemies.iter().enumerate() {
                if !killed_enemies.contains(&ei) && bullet.rect.intersects(&enemy.rect) {
                    used_bullets.push(bi);
                    killed_enemies.push(ei);
                    break;
                }
            }
        }

        self.score += KILL_REWARD * killed_enemies.len() as u32;

        let bullets = std::mem::take(&mut self.bullets);
        self.bullets = bullets
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !used_bullets.contains(i))
            .map(|(_, b)| b)
            .collect();

        let enemies = std::mem::take(&mut self.enemies);
        self.enemies = enemies
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !killed_enemies.contains(i))
            .map(|(_, e)| e)
            .collect();

        SessionEvent::Continue(self.score)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
