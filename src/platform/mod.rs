//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Pointer input (click → tank coordinates)
//! - Frame pacing (wall time → sim time)

use glam::Vec2;

use crate::consts::MAX_FRAME_MS;
use crate::sim::Millis;

/// Monotonic milliseconds since an arbitrary origin
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Monotonic milliseconds since an arbitrary origin
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Map a click in client coordinates to tank coordinates, given the tank's
/// bounding box origin
#[inline]
pub fn tank_point(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Vec2 {
    Vec2::new((client_x - rect_left) as f32, (client_y - rect_top) as f32)
}

/// Converts animation-frame timestamps into sim time.
///
/// Each frame advances the sim by the wall-clock delta, clamped so a tab
/// returning from the background does not replay minutes of ticks.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_wall: Option<f64>,
    carry: f64,
    sim_now: Millis,
}

impl FrameClock {
    pub fn new(sim_now: Millis) -> Self {
        Self {
            last_wall: None,
            carry: 0.0,
            sim_now,
        }
    }

    pub fn sim_now(&self) -> Millis {
        self.sim_now
    }

    /// Feed a wall-clock timestamp (ms), returning the new sim time
    pub fn frame(&mut self, wall_ms: f64) -> Millis {
        if let Some(last) = self.last_wall {
            let delta = (wall_ms - last).clamp(0.0, MAX_FRAME_MS as f64) + self.carry;
            let whole = delta.floor();
            self.carry = delta - whole;
            self.sim_now += whole as Millis;
        }
        self.last_wall = Some(wall_ms);
        self.sim_now
    }

    /// Forget the last wall timestamp; the next frame only re-anchors, so
    /// time spent hidden never reaches the sim
    pub fn pause(&mut self) {
        self.last_wall = None;
        self.carry = 0.0;
    }
}
