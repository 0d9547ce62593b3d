//! Fish Tank - a decorative aquarium you can feed
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish steering, food lifecycle, bubbles)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Visual preferences persisted in LocalStorage

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::TankError;
pub use settings::{QualityPreset, Settings};

/// Simulation constants
///
/// Distances are CSS pixels with the origin at the tank's top-left corner,
/// durations are milliseconds of sim time.
pub mod consts {
    /// Fish steering tick
    pub const FISH_TICK_MS: u64 = 50;
    /// Food sprite fall/fade tick
    pub const FOOD_TICK_MS: u64 = 50;
    /// Unconditional food sprite removal after spawn
    pub const FOOD_TIMEOUT_MS: u64 = 5000;
    /// Tank sweep period
    pub const SWEEP_INTERVAL_MS: u64 = 1000;
    /// Food older than this is dropped by the sweep
    pub const FOOD_MAX_AGE_MS: u64 = 5000;

    /// Fish notice food closer than this
    pub const SIGHT_RADIUS: f32 = 150.0;
    /// A target closer than this counts as reached
    pub const REACH_RADIUS: f32 = 20.0;
    /// Seeking speed relative to the fish's cruising speed
    pub const SEEK_SPEED_FACTOR: f32 = 1.5;
    /// Per-tick chance of picking a new wander direction
    pub const WANDER_CHANCE: f32 = 0.02;

    /// Swim area insets from the tank edges (fish box top-left corner)
    pub const SWIM_INSET_LEFT: f32 = 20.0;
    pub const SWIM_INSET_RIGHT: f32 = 100.0;
    pub const SWIM_INSET_TOP: f32 = 50.0;
    pub const SWIM_INSET_BOTTOM: f32 = 150.0;

    /// Food falls this far per tick
    pub const FOOD_FALL_STEP: f32 = 2.0;
    /// Food starts fading below `height - FOOD_FADE_INSET`
    pub const FOOD_FADE_INSET: f32 = 200.0;
    /// Food is removed below `height - FOOD_FLOOR_INSET`
    pub const FOOD_FLOOR_INSET: f32 = 100.0;
    /// Opacity lost per tick while fading
    pub const FOOD_FADE_STEP: f32 = 0.05;

    /// Decorative bubbles in the tank
    pub const BUBBLE_COUNT: usize = 12;

    /// Largest sim-time step taken per animation frame
    pub const MAX_FRAME_MS: u64 = 100;

    /// Initial fish spawn area (before clamping into the swim area)
    pub const SPAWN_WIDTH: f32 = 800.0;
    pub const SPAWN_TOP: f32 = 100.0;
    pub const SPAWN_HEIGHT: f32 = 400.0;
}

/// Convert a hex color (`0xRRGGBB`) to normalized RGBA
#[inline]
pub fn hex_color(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}
