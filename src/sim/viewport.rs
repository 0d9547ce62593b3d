//! Tank dimensions and the limits derived from them
//!
//! The viewport is read live: resizing the page moves the swim area and the
//! food fade/floor lines on the very next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Visible tank size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Area a fish's top-left corner is confined to
    pub fn swim_bounds(&self) -> Bounds {
        let min = Vec2::new(SWIM_INSET_LEFT, SWIM_INSET_TOP);
        // A tank too small for the insets pins fish at the lower bound
        let max = Vec2::new(
            (self.width - SWIM_INSET_RIGHT).max(min.x),
            (self.height - SWIM_INSET_BOTTOM).max(min.y),
        );
        Bounds { min, max }
    }

    /// Food below this line starts to fade
    pub fn fade_line(&self) -> f32 {
        self.height - FOOD_FADE_INSET
    }

    /// Food below this line is removed
    pub fn floor_line(&self) -> f32 {
        self.height - FOOD_FLOOR_INSET
    }
}

/// Axis-aligned inclusive rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
