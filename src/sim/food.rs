//! Food pellets
//!
//! A pellet exists twice: as a `FoodParticle` record in the tank's shared
//! list (what fish see) and as a `FoodSprite` (what the viewer sees fall and
//! fade). The sprite never mutates the shared list; it reports a
//! `RemovalReason` and the tank does the removal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::{Interval, Millis, Timeout};
use super::viewport::Viewport;
use crate::consts::*;

/// Unique, monotonic pellet id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FoodId(pub u64);

impl std::fmt::Display for FoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "food#{}", self.0)
    }
}

/// Shared record of a pellet: where it was dropped and when
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodParticle {
    pub id: FoodId,
    pub x: f32,
    pub y: f32,
    pub created_at: Millis,
}

impl FoodParticle {
    /// Spawn position of record
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.created_at)
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        self.age(now) >= FOOD_MAX_AGE_MS
    }
}

/// Why a sprite asked to be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Fell past the floor line
    ReachedBottom,
    /// Opacity hit zero
    Faded,
    /// The 5 s timeout fired
    TimedOut,
}

/// Falling, fading view of one pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSprite {
    pub id: FoodId,
    pub x: f32,
    fall_y: f32,
    opacity: f32,
    fall: Interval,
    timeout: Timeout,
}

impl FoodSprite {
    pub fn new(particle: &FoodParticle) -> Self {
        Self {
            id: particle.id,
            x: particle.x,
            fall_y: particle.y,
            opacity: 1.0,
            fall: Interval::start(FOOD_TICK_MS, particle.created_at),
            timeout: Timeout::start(FOOD_TIMEOUT_MS, particle.created_at),
        }
    }

    /// Current drawn position
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.fall_y)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn next_fall(&self) -> Option<Millis> {
        self.fall.next_due()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.timeout.deadline()
    }

    /// Run one fall tick if due. Returns a removal request when the pellet
    /// has reached the floor or faded out.
    pub fn fall_tick(&mut self, now: Millis, view: Viewport) -> Option<RemovalReason> {
        if !self.fall.fire(now) {
            return None;
        }

        let next_y = self.fall_y + FOOD_FALL_STEP;
        if next_y > view.fade_line() {
            self.opacity = (self.opacity - FOOD_FADE_STEP).max(0.0);
        }

        if next_y > view.floor_line() {
            return Some(RemovalReason::ReachedBottom);
        }
        if self.opacity <= 0.0 {
            return Some(RemovalReason::Faded);
        }

        self.fall_y = next_y;
        None
    }

    /// Fire the unconditional timeout if due
    pub fn timeout_tick(&mut self, now: Millis) -> Option<RemovalReason> {
        self.timeout.fire(now).then_some(RemovalReason::TimedOut)
    }

    /// Release both timers
    pub fn clear_timers(&mut self) {
        self.fall.clear();
        self.timeout.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(y: f32) -> FoodParticle {
        FoodParticle {
            id: FoodId(1),
            x: 100.0,
            y,
            created_at: 0,
        }
    }

    #[test]
    fn test_sprite_falls_two_pixels_per_tick() {
        let view = Viewport::new(800.0, 1000.0);
        let mut sprite = FoodSprite::new(&particle(100.0));

        // Not due yet
        assert_eq!(sprite.fall_tick(49, view), None);
        assert_eq!(sprite.pos().y, 100.0);

        for step in 1..=10 {
            assert_eq!(sprite.fall_tick(step * FOOD_TICK_MS, view), None);
        }
        assert!((sprite.pos().y - 120.0).abs() < 1e-4);
        assert_eq!(sprite.opacity(), 1.0);
        assert_eq!(sprite.pos().x, 100.0);
    }

    #[test]
    fn test_sprite_fades_below_fade_line() {
        // fade line at 400, floor at 500
        let view = Viewport::new(800.0, 600.0);
        let mut sprite = FoodSprite::new(&particle(399.0));

        assert_eq!(sprite.fall_tick(50, view), None);
        assert!((sprite.opacity() - 0.95).abs() < 1e-6);
        assert_eq!(sprite.fall_tick(100, view), None);
        assert!((sprite.opacity() - 0.90).abs() < 1e-6);
    }

    #[test]
    fn test_sprite_reaches_bottom() {
        let view = Viewport::new(800.0, 600.0);
        let mut sprite = FoodSprite::new(&particle(499.0));

        assert_eq!(
            sprite.fall_tick(50, view),
            Some(RemovalReason::ReachedBottom)
        );
        // Position is left where it was
        assert_eq!(sprite.pos().y, 499.0);
    }

    #[test]
    fn test_sprite_fades_out_before_floor() {
        // Fade band of 100 px lets opacity reach zero after 20 ticks (40 px)
        let view = Viewport::new(800.0, 600.0);
        let mut sprite = FoodSprite::new(&particle(400.0));

        let mut reason = None;
        let mut now = 0;
        while reason.is_none() {
            now += FOOD_TICK_MS;
            reason = sprite.fall_tick(now, view);
        }
        assert_eq!(reason, Some(RemovalReason::Faded));
        assert_eq!(sprite.opacity(), 0.0);
        assert!(now <= 21 * FOOD_TICK_MS);
    }

    #[test]
    fn test_timeout_fires_at_five_seconds() {
        let mut sprite = FoodSprite::new(&FoodParticle {
            created_at: 1000,
            ..particle(10.0)
        });
        assert_eq!(sprite.deadline(), Some(6000));
        assert_eq!(sprite.timeout_tick(5999), None);
        assert_eq!(sprite.timeout_tick(6000), Some(RemovalReason::TimedOut));
        assert_eq!(sprite.timeout_tick(7000), None);
    }

    #[test]
    fn test_particle_expiry() {
        let food = particle(0.0);
        assert!(!food.is_expired(4999));
        assert!(food.is_expired(5000));
        assert_eq!(food.age(0), 0);
    }
}
