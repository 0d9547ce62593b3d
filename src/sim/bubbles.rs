//! Decorative bubbles
//!
//! Bubbles are generated once and never simulated: where a bubble is drawn is
//! a pure function of the time since the tank opened. They do not interact
//! with fish or food.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::timer::Millis;
use super::viewport::Viewport;

/// One looping bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    /// Diameter in pixels (4..12)
    pub size: f32,
    /// Horizontal position as a fraction of the tank width (0..1)
    pub left: f32,
    /// Seconds before the first rise
    pub delay: f32,
    /// Seconds per rise (4..7)
    pub duration: f32,
}

/// Where and how visible a bubble is at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleFrame {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Bubble {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            size: rng.random::<f32>() * 8.0 + 4.0,
            left: rng.random::<f32>(),
            delay: rng.random::<f32>() * 5.0,
            duration: rng.random::<f32>() * 3.0 + 4.0,
        }
    }

    /// Evaluate the bubble `elapsed` ms after the tank opened.
    ///
    /// Returns `None` while the bubble is still waiting out its delay.
    pub fn frame_at(&self, elapsed: Millis, view: Viewport) -> Option<BubbleFrame> {
        let t = elapsed as f32 / 1000.0 - self.delay;
        if t < 0.0 {
            return None;
        }

        // 0 at the bottom, 1 at the surface
        let progress = (t / self.duration).fract();
        let radius = self.size / 2.0;
        let wobble = (t * 3.0 + self.left * 10.0).sin() * 4.0;

        let travel = (view.height - self.size).max(0.0);
        let x = (self.left * view.width + wobble).clamp(radius, (view.width - radius).max(radius));
        let y = view.height - radius - progress * travel;

        // Fade in at the bottom, out near the surface
        let alpha = (progress * 10.0).min(1.0) * (1.0 - progress).min(0.2) / 0.2;

        Some(BubbleFrame {
            center: Vec2::new(x, y),
            radius,
            alpha,
        })
    }
}

/// Generate `count` independent bubbles
pub fn generate<R: Rng>(rng: &mut R, count: usize) -> Vec<Bubble> {
    (0..count).map(|_| Bubble::random(rng)).collect()
}
