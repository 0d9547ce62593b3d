//! Fish and their steering
//!
//! Each fish ticks on its own 50 ms timer. A tick either pursues the first
//! pellet seen within sight range or wanders, then integrates and bounces off
//! the swim-area edges.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::{FoodId, FoodParticle};
use super::timer::{Interval, Millis};
use super::viewport::{Bounds, Viewport};
use crate::consts::*;
use crate::hex_color;

/// Body size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishSize {
    Small,
    Medium,
    Large,
}

impl FishSize {
    /// Box the fish is drawn in, in CSS pixels
    pub fn extent(&self) -> Vec2 {
        match self {
            FishSize::Small => Vec2::new(32.0, 24.0),
            FishSize::Medium => Vec2::new(48.0, 32.0),
            FishSize::Large => Vec2::new(64.0, 48.0),
        }
    }
}

/// Which way the fish is drawn facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Species-like traits fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishKind {
    pub color: [f32; 4],
    pub size: FishSize,
    /// Cruising speed in pixels per tick
    pub speed: f32,
}

impl FishKind {
    pub fn new(rgb: u32, size: FishSize, speed: f32) -> Self {
        Self {
            color: hex_color(rgb, 1.0),
            size,
            speed,
        }
    }
}

/// The eight fish every tank starts with
pub fn stock_roster() -> Vec<FishKind> {
    use FishSize::*;
    vec![
        FishKind::new(0xFF6B35, Medium, 2.0),
        FishKind::new(0xF7931E, Large, 1.5),
        FishKind::new(0xFFD23F, Small, 3.0),
        FishKind::new(0x06FFA5, Medium, 2.5),
        FishKind::new(0x4ECDC4, Small, 3.5),
        FishKind::new(0x45B7D1, Large, 1.8),
        FishKind::new(0x96CEB4, Medium, 2.2),
        FishKind::new(0xFECA57, Small, 2.8),
    ]
}

/// A locked pellet: its id and spawn position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodTarget {
    pub id: FoodId,
    pub pos: Vec2,
}

/// One fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub kind: FishKind,
    pos: Vec2,
    dir: Vec2,
    facing: Facing,
    target: Option<FoodTarget>,
    timer: Interval,
}

impl Fish {
    /// Place a fish at `pos` heading along `dir`; its timer starts at `now`
    pub fn new(kind: FishKind, pos: Vec2, dir: Vec2, now: Millis) -> Self {
        let mut fish = Self {
            kind,
            pos,
            dir,
            facing: Facing::Right,
            target: None,
            timer: Interval::start(FISH_TICK_MS, now),
        };
        fish.update_facing(dir);
        fish
    }

    /// Spawn somewhere in the upper-left of the tank with a random heading
    pub fn spawn<R: Rng>(kind: FishKind, rng: &mut R, view: Viewport, now: Millis) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * SPAWN_WIDTH,
            SPAWN_TOP + rng.random::<f32>() * SPAWN_HEIGHT,
        );
        let dir = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0,
            (rng.random::<f32>() - 0.5) * 2.0,
        );
        let mut fish = Self::new(kind, pos, dir, now);
        confine(&mut fish.pos, &mut fish.dir, view.swim_bounds());
        fish
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Cruising heading; a chase steers around it without replacing it
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn target(&self) -> Option<FoodTarget> {
        self.target
    }

    pub fn next_tick(&self) -> Option<Millis> {
        self.timer.next_due()
    }

    /// Center of the drawn body
    pub fn center(&self) -> Vec2 {
        self.pos + self.kind.size.extent() * 0.5
    }

    /// Run one steering tick if the fish's timer is due at `now`
    pub fn tick<R: Rng>(
        &mut self,
        now: Millis,
        food: &[FoodParticle],
        view: Viewport,
        rng: &mut R,
    ) -> bool {
        if !self.timer.fire(now) {
            return false;
        }
        self.steer(food, view, rng);
        true
    }

    /// One steering step, independent of the timer
    pub fn steer<R: Rng>(&mut self, food: &[FoodParticle], view: Viewport, rng: &mut R) {
        // Drop a target whose pellet is gone
        if let Some(target) = self.target {
            if !food.iter().any(|f| f.id == target.id) {
                self.target = None;
            }
        }

        if self.target.is_none() {
            self.target = food
                .iter()
                .find(|f| f.pos().distance(self.pos) < SIGHT_RADIUS)
                .map(|f| FoodTarget {
                    id: f.id,
                    pos: f.pos(),
                });
        }

        // Seeking steers this tick only; `dir` keeps the wander heading
        let mut heading = self.dir;
        match self.target {
            Some(target) => {
                let to_target = target.pos - self.pos;
                let distance = to_target.length();
                if distance < REACH_RADIUS {
                    self.target = None;
                } else {
                    heading = to_target / distance * self.kind.speed * SEEK_SPEED_FACTOR;
                }
            }
            None => {
                if rng.random::<f32>() < WANDER_CHANCE {
                    let half = self.kind.speed / 2.0;
                    let quarter = self.kind.speed / 4.0;
                    self.dir = Vec2::new(
                        rng.random_range(-half..=half),
                        rng.random_range(-quarter..=quarter),
                    );
                    heading = self.dir;
                }
            }
        }

        self.pos += heading;
        // A wall bounce is remembered, seek heading included
        if confine(&mut self.pos, &mut heading, view.swim_bounds()) {
            self.dir = heading;
        }
        self.update_facing(heading);
    }

    fn update_facing(&mut self, heading: Vec2) {
        if heading.x < 0.0 {
            self.facing = Facing::Left;
        } else if heading.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Release the steering timer
    pub fn stop(&mut self) {
        self.timer.clear();
    }
}

/// Clamp `pos` into `bounds`, reflecting `dir` off each edge hit. Returns
/// whether any edge was hit.
fn confine(pos: &mut Vec2, dir: &mut Vec2, bounds: Bounds) -> bool {
    let mut hit = false;

    if pos.x < bounds.min.x {
        pos.x = bounds.min.x;
        dir.x = dir.x.abs();
        hit = true;
    }
    if pos.x > bounds.max.x {
        pos.x = bounds.max.x;
        dir.x = -dir.x.abs();
        hit = true;
    }
    if pos.y < bounds.min.y {
        pos.y = bounds.min.y;
        dir.y = dir.y.abs();
        hit = true;
    }
    if pos.y > bounds.max.y {
        pos.y = bounds.max.y;
        dir.y = -dir.y.abs();
        hit = true;
    }
    hit
}
