//! Deterministic simulation module
//!
//! All tank behavior lives here. This module must stay pure and deterministic:
//! - Integer millisecond sim time only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod bubbles;
pub mod fish;
pub mod food;
pub mod tank;
pub mod timer;
pub mod viewport;

pub use bubbles::{Bubble, BubbleFrame};
pub use fish::{Facing, Fish, FishKind, FishSize, FoodTarget, stock_roster};
pub use food::{FoodId, FoodParticle, FoodSprite, RemovalReason};
pub use tank::Tank;
pub use timer::{Interval, Millis, Timeout};
pub use viewport::{Bounds, Viewport};
