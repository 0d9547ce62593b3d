//! Frame composition
//!
//! Turns a `Tank` into one triangle list, back to front: water, glass sheen,
//! surface shimmer, sand, seaweed, bubbles, fish, food.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::settings::Settings;
use crate::sim::{Facing, Fish, FoodSprite, Tank, Viewport};

/// Height of the shimmering band under the water surface
const SURFACE_BAND: f32 = 80.0;
/// Height of the sand band at the bottom
const SAND_BAND: f32 = 96.0;
/// Food pellet radius
const FOOD_RADIUS: f32 = 4.0;

/// A seaweed strand anchored to the tank floor
struct Strand {
    /// Anchor x as (fraction of width, pixel offset)
    anchor: (f32, f32),
    width: f32,
    height: f32,
    /// Sway phase; reversed strands swing the other way
    phase: f32,
    reverse: bool,
}

const STRANDS: [Strand; 3] = [
    Strand {
        anchor: (0.0, 32.0 + 12.0),
        width: 24.0,
        height: 128.0,
        phase: 0.0,
        reverse: false,
    },
    Strand {
        anchor: (1.0, -48.0 - 8.0),
        width: 16.0,
        height: 112.0,
        phase: 0.7,
        reverse: true,
    },
    Strand {
        anchor: (1.0 / 3.0, 10.0),
        width: 20.0,
        height: 144.0,
        phase: 1.9,
        reverse: false,
    },
];

/// Build the vertex list for one frame
pub fn build(tank: &Tank, settings: &Settings) -> Vec<Vertex> {
    let view = tank.viewport();
    let secs = tank.elapsed() as f32 / 1000.0;
    let segments = settings.quality.circle_segments();

    let mut vertices = Vec::with_capacity(4096);
    water(&mut vertices, view, settings, secs);

    if settings.seaweed {
        for (i, strand) in STRANDS.iter().enumerate() {
            let base = Vec2::new(strand.anchor.0 * view.width + strand.anchor.1, view.height);
            let sway_amp = if settings.effective_sway() { strand.width * 0.6 } else { 0.0 };
            let dir = if strand.reverse { -1.0 } else { 1.0 };
            let phase = strand.phase + secs * 1.3 * dir;
            vertices.extend(shapes::strand(
                base,
                strand.width,
                strand.height,
                colors::SEAWEED[i % colors::SEAWEED.len()],
                settings.quality.strand_segments(),
                |t| (phase + t).sin() * sway_amp * t * t,
            ));
        }
    }

    if settings.bubbles {
        for bubble in tank.bubbles() {
            if let Some(frame) = bubble.frame_at(tank.elapsed(), view) {
                vertices.extend(shapes::circle(
                    frame.center,
                    frame.radius,
                    with_alpha(colors::BUBBLE, frame.alpha),
                    segments,
                ));
                vertices.extend(shapes::ring(
                    frame.center,
                    frame.radius * 0.75,
                    frame.radius,
                    with_alpha(colors::BUBBLE_RIM, frame.alpha),
                    segments,
                ));
            }
        }
    }

    for fish in tank.fish() {
        draw_fish(&mut vertices, fish, secs, segments);
    }

    for sprite in tank.sprites() {
        draw_food(&mut vertices, sprite, secs, segments);
    }

    vertices
}

fn water(out: &mut Vec<Vertex>, view: Viewport, settings: &Settings, secs: f32) {
    let (w, h) = (view.width, view.height);
    let mid = h * 0.5;

    out.extend(shapes::vertical_gradient(
        Vec2::ZERO,
        Vec2::new(w, mid),
        colors::WATER_TOP,
        colors::WATER_MID,
    ));
    out.extend(shapes::vertical_gradient(
        Vec2::new(0.0, mid),
        Vec2::new(w, h),
        colors::WATER_MID,
        colors::WATER_BOTTOM,
    ));
    out.extend(shapes::diagonal_gradient(
        Vec2::ZERO,
        Vec2::new(w, h),
        colors::GLASS_SHEEN,
        with_alpha(colors::GLASS_SHEEN, 0.0),
    ));

    if settings.shimmer {
        let pulse = if settings.effective_shimmer_pulse() {
            0.75 + 0.25 * (secs * std::f32::consts::PI).sin()
        } else {
            1.0
        };
        out.extend(shapes::vertical_gradient(
            Vec2::ZERO,
            Vec2::new(w, SURFACE_BAND.min(h)),
            with_alpha(colors::SURFACE, pulse),
            with_alpha(colors::SURFACE, 0.0),
        ));
    }

    out.extend(shapes::vertical_gradient(
        Vec2::new(0.0, (h - SAND_BAND).max(0.0)),
        Vec2::new(w, h),
        with_alpha(colors::SAND, 0.0),
        colors::SAND,
    ));
}

fn draw_fish(out: &mut Vec<Vertex>, fish: &Fish, secs: f32, segments: u32) {
    let extent = fish.kind.size.extent();
    let color = fish.kind.color;
    let center = fish.center();
    let radii = extent * 0.5;
    // +1 when the head points right
    let head = match fish.facing() {
        Facing::Right => 1.0,
        Facing::Left => -1.0,
    };
    let flip = |offset: Vec2| center + Vec2::new(offset.x * head, offset.y);

    // Tail flicks a little while swimming
    let flick = (secs * 8.0 + fish.kind.speed).sin() * radii.y * 0.15;
    let tail_root = flip(Vec2::new(-radii.x * 0.85, 0.0));
    let tail_top = flip(Vec2::new(-radii.x * 1.35, -radii.y * 0.7 + flick));
    let tail_bottom = flip(Vec2::new(-radii.x * 1.35, radii.y * 0.7 + flick));
    out.extend(shapes::triangle(
        tail_root,
        tail_top,
        tail_bottom,
        with_alpha(color, 0.8),
    ));

    out.extend(shapes::ellipse(center, radii, color, segments));

    // Fins
    let fin = with_alpha(color, 0.6);
    out.extend(shapes::ellipse(
        flip(Vec2::new(-radii.x * 0.2, radii.y * 0.95)),
        Vec2::new(radii.x * 0.18, radii.y * 0.22),
        fin,
        segments / 2,
    ));
    out.extend(shapes::ellipse(
        flip(Vec2::new(0.0, -radii.y * 0.95)),
        Vec2::new(radii.x * 0.1, radii.y * 0.25),
        fin,
        segments / 2,
    ));

    // Eye
    let eye = flip(Vec2::new(radii.x * 0.5, -radii.y * 0.35));
    let eye_r = (radii.y * 0.25).max(3.0);
    out.extend(shapes::circle(eye, eye_r, colors::EYE, segments / 2));
    out.extend(shapes::circle(
        eye + Vec2::new(eye_r * 0.35 * head, -eye_r * 0.2),
        eye_r * 0.5,
        colors::PUPIL,
        segments / 2,
    ));
}

fn draw_food(out: &mut Vec<Vertex>, sprite: &FoodSprite, secs: f32, segments: u32) {
    let opacity = sprite.opacity();
    if opacity <= 0.0 {
        return;
    }

    // Wiggle around the fall line
    let wiggle = (secs * 10.0 + sprite.id.0 as f32).sin() * 1.5;
    let center = sprite.pos() + Vec2::new(wiggle, 0.0);
    let glow = 0.5 + 0.5 * (secs * 4.0).sin().abs();

    out.extend(shapes::circle(
        center,
        FOOD_RADIUS,
        with_alpha(colors::FOOD, opacity),
        segments / 2,
    ));
    out.extend(shapes::circle(
        center,
        FOOD_RADIUS * 0.8,
        with_alpha(colors::FOOD_GLOW, opacity * glow),
        segments / 2,
    ));
}
