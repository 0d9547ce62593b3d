//! The tank: owner of the shared food list
//!
//! Fish, food sprites, and the sweep each own a timer. `advance_to` walks sim
//! time forward, firing whichever owned timer is due next, one at a time, the
//! way independent `setInterval` callbacks interleave on a single event loop.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bubbles::{self, Bubble};
use super::fish::{self, Fish, FishKind};
use super::food::{FoodId, FoodParticle, FoodSprite, RemovalReason};
use super::timer::{Interval, Millis};
use super::viewport::Viewport;
use crate::consts::*;

/// A timer owned by something in the tank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    SpriteFall(usize),
    SpriteTimeout(usize),
    Sweep,
    Fish(usize),
}

/// Complete tank state
#[derive(Debug, Clone)]
pub struct Tank {
    rng: Pcg32,
    now: Millis,
    opened_at: Millis,
    viewport: Viewport,
    /// Shared food list, in spawn order
    food: Vec<FoodParticle>,
    /// Falling views of the pellets in `food`, same order
    sprites: Vec<FoodSprite>,
    fish: Vec<Fish>,
    bubbles: Vec<Bubble>,
    sweep: Interval,
    next_food_id: u64,
    running: bool,
}

impl Tank {
    /// Open a tank stocked with the standard roster and bubbles
    pub fn new(seed: u64, viewport: Viewport, now: Millis) -> Self {
        let mut tank = Self::empty(seed, viewport, now);
        tank.bubbles = bubbles::generate(&mut tank.rng, BUBBLE_COUNT);
        for kind in fish::stock_roster() {
            tank.add_fish(kind);
        }
        log::info!(
            "Tank opened: seed={}, {} fish, {}x{}",
            seed,
            tank.fish.len(),
            viewport.width,
            viewport.height
        );
        tank
    }

    /// Open a tank with no fish and no bubbles
    pub fn empty(seed: u64, viewport: Viewport, now: Millis) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            now,
            opened_at: now,
            viewport,
            food: Vec::new(),
            sprites: Vec::new(),
            fish: Vec::new(),
            bubbles: Vec::new(),
            sweep: Interval::start(SWEEP_INTERVAL_MS, now),
            next_food_id: 0,
            running: true,
        }
    }

    /// Spawn a fish of `kind` at a random spot
    pub fn add_fish(&mut self, kind: FishKind) {
        let fish = Fish::spawn(kind, &mut self.rng, self.viewport, self.now);
        self.fish.push(fish);
    }

    /// Add an already placed fish (its timer keeps its own phase)
    pub fn insert_fish(&mut self, fish: Fish) {
        self.fish.push(fish);
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Sim time since the tank opened
    pub fn elapsed(&self) -> Millis {
        self.now - self.opened_at
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn food(&self) -> &[FoodParticle] {
        &self.food
    }

    pub fn sprites(&self) -> &[FoodSprite] {
        &self.sprites
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Live resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::info!("Tank resized to {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    /// Drop a pellet at tank coordinates `(x, y)`
    pub fn spawn_food(&mut self, x: f32, y: f32) -> FoodId {
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;

        let particle = FoodParticle {
            id,
            x,
            y,
            created_at: self.now,
        };
        if self.running {
            self.sprites.push(FoodSprite::new(&particle));
        }
        self.food.push(particle);

        log::debug!("Spawned {} at ({:.0}, {:.0})", id, x, y);
        id
    }

    /// Remove a pellet by id; absent ids are a no-op
    pub fn remove_food(&mut self, id: FoodId) -> bool {
        let before = self.food.len();
        self.food.retain(|f| f.id != id);
        self.sprites.retain(|s| s.id != id);
        before != self.food.len()
    }

    /// Remove every pellet at or past the maximum age
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.now;
        let before = self.food.len();
        self.food.retain(|f| !f.is_expired(now));

        let food = &self.food;
        self.sprites.retain(|s| food.iter().any(|f| f.id == s.id));

        let removed = before - self.food.len();
        if removed > 0 {
            log::debug!("Sweep removed {} expired pellet(s)", removed);
        }
        removed
    }

    /// Run every timer due up to and including `target`
    pub fn advance_to(&mut self, target: Millis) {
        if target <= self.now {
            return;
        }

        while self.running {
            let Some((due_at, due)) = self.next_due() else {
                break;
            };
            if due_at > target {
                break;
            }
            self.now = due_at;
            self.fire(due);
        }

        self.now = target;
    }

    /// Earliest pending timer. Ties go to sprites, then the sweep, then fish,
    /// each in list order.
    fn next_due(&self) -> Option<(Millis, Due)> {
        let sprites = self.sprites.iter().enumerate().flat_map(|(i, s)| {
            [
                s.next_fall().map(|t| (t, Due::SpriteFall(i))),
                s.deadline().map(|t| (t, Due::SpriteTimeout(i))),
            ]
        });
        let sweep = self.sweep.next_due().map(|t| (t, Due::Sweep));
        let fish = self
            .fish
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.next_tick().map(|t| (t, Due::Fish(i))));

        // min_by_key keeps the first of equal keys, so chain order breaks ties
        sprites
            .flatten()
            .chain(sweep)
            .chain(fish)
            .min_by_key(|(t, _)| *t)
    }

    fn fire(&mut self, due: Due) {
        let now = self.now;
        match due {
            Due::SpriteFall(i) => {
                let view = self.viewport;
                let sprite = &mut self.sprites[i];
                let id = sprite.id;
                if let Some(reason) = sprite.fall_tick(now, view) {
                    self.handle_removal(id, reason);
                }
            }
            Due::SpriteTimeout(i) => {
                let sprite = &mut self.sprites[i];
                let id = sprite.id;
                if let Some(reason) = sprite.timeout_tick(now) {
                    self.handle_removal(id, reason);
                }
            }
            Due::Sweep => {
                self.sweep.fire(now);
                self.sweep_expired();
            }
            Due::Fish(i) => {
                let Self {
                    fish,
                    food,
                    rng,
                    viewport,
                    ..
                } = self;
                fish[i].tick(now, food, *viewport, rng);
            }
        }
    }

    /// A sprite asked to go; the tank performs the removal
    fn handle_removal(&mut self, id: FoodId, reason: RemovalReason) {
        if self.remove_food(id) {
            log::debug!("Removed {} ({:?})", id, reason);
        }
    }

    /// Tear the tank down, releasing every timer
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.sweep.clear();
        for fish in &mut self.fish {
            fish.stop();
        }
        for sprite in &mut self.sprites {
            sprite.clear_timers();
        }
        self.sprites.clear();
        log::info!("Tank shut down after {} ms", self.elapsed());
    }

    /// Number of active timers
    pub fn active_timers(&self) -> usize {
        let sprite_timers: usize = self
            .sprites
            .iter()
            .map(|s| s.next_fall().is_some() as usize + s.deadline().is_some() as usize)
            .sum();
        let fish_timers = self.fish.iter().filter(|f| f.next_tick().is_some()).count();
        sprite_timers + fish_timers + self.sweep.is_active() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fish::FishSize;
    use glam::Vec2;

    fn view() -> Viewport {
        Viewport::new(1200.0, 800.0)
    }

    #[test]
    fn test_new_tank_is_stocked() {
        let tank = Tank::new(12345, view(), 0);
        assert_eq!(tank.fish().len(), 8);
        assert_eq!(tank.bubbles().len(), BUBBLE_COUNT);
        assert!(tank.food().is_empty());
        // 8 fish + sweep
        assert_eq!(tank.active_timers(), 9);
    }

    #[test]
    fn test_food_ids_are_monotonic() {
        let mut tank = Tank::empty(1, view(), 0);
        let ids: Vec<FoodId> = (0..5)
            .map(|i| tank.spawn_food(100.0 + i as f32, 100.0))
            .collect();

        assert_eq!(ids, (0..5).map(FoodId).collect::<Vec<_>>());
        let listed: Vec<FoodId> = tank.food().iter().map(|f| f.id).collect();
        assert_eq!(listed, ids);
        assert_eq!(tank.sprites().len(), 5);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut tank = Tank::empty(1, view(), 0);
        let a = tank.spawn_food(10.0, 10.0);
        assert!(tank.remove_food(a));
        let b = tank.spawn_food(10.0, 10.0);
        assert!(b > a);
    }

    #[test]
    fn test_remove_absent_food_is_noop() {
        let mut tank = Tank::empty(1, view(), 0);
        tank.spawn_food(10.0, 10.0);
        assert!(!tank.remove_food(FoodId(99)));
        assert_eq!(tank.food().len(), 1);
    }

    #[test]
    fn test_sweep_keeps_young_food() {
        let mut tank = Tank::empty(1, view(), 0);
        tank.spawn_food(10.0, 10.0);
        tank.now = 4999;
        assert_eq!(tank.sweep_expired(), 0);
        tank.now = 5000;
        assert_eq!(tank.sweep_expired(), 1);
        assert!(tank.sprites().is_empty());
    }

    #[test]
    fn test_sweep_without_sprite_timers() {
        // A particle whose sprite never asks to leave is swept at t=5000
        let mut tank = Tank::empty(1, view(), 0);
        tank.spawn_food(100.0, 100.0);
        for sprite in &mut tank.sprites {
            sprite.clear_timers();
        }

        tank.advance_to(4000);
        assert_eq!(tank.food().len(), 1);
        tank.advance_to(5000);
        assert!(tank.food().is_empty());
    }

    #[test]
    fn test_timeout_removes_food_within_five_seconds() {
        // Tall tank: the pellet would take far longer than 5 s to fall
        let mut tank = Tank::empty(1, Viewport::new(800.0, 10_000.0), 0);
        tank.advance_to(730);
        let id = tank.spawn_food(400.0, 10.0);

        tank.advance_to(730 + 4999);
        assert!(tank.food().iter().any(|f| f.id == id));
        tank.advance_to(730 + 5000);
        assert!(tank.food().is_empty());
        assert!(tank.sprites().is_empty());
    }

    #[test]
    fn test_food_reaching_floor_is_removed() {
        // Floor line at 500; a pellet at 490 lands after 6 ticks
        let mut tank = Tank::empty(1, Viewport::new(800.0, 600.0), 0);
        tank.spawn_food(400.0, 490.0);

        tank.advance_to(250);
        assert_eq!(tank.food().len(), 1);
        tank.advance_to(300);
        assert!(tank.food().is_empty());
    }

    #[test]
    fn test_fish_sees_food_next_tick() {
        let mut tank = Tank::empty(1, view(), 0);
        let kind = FishKind::new(0x4ECDC4, FishSize::Small, 3.5);
        tank.insert_fish(Fish::new(kind, Vec2::new(300.0, 300.0), Vec2::ZERO, 0));

        tank.advance_to(20);
        let id = tank.spawn_food(350.0, 300.0);
        tank.advance_to(50);

        assert_eq!(tank.fish()[0].target().map(|t| t.id), Some(id));
        assert!(tank.fish()[0].pos().x > 300.0);
    }

    #[test]
    fn test_fish_lets_go_of_removed_food() {
        let mut tank = Tank::empty(1, view(), 0);
        let kind = FishKind::new(0x45B7D1, FishSize::Large, 1.8);
        tank.insert_fish(Fish::new(kind, Vec2::new(300.0, 300.0), Vec2::ZERO, 0));

        let id = tank.spawn_food(420.0, 300.0);
        tank.advance_to(50);
        assert!(tank.fish()[0].target().is_some());

        tank.remove_food(id);
        tank.advance_to(100);
        assert!(tank.fish()[0].target().is_none());
    }

    #[test]
    fn test_determinism() {
        let mut a = Tank::new(99999, view(), 0);
        let mut b = Tank::new(99999, view(), 0);

        for step in 1..=40u64 {
            if step % 7 == 0 {
                let x = 100.0 + step as f32 * 20.0;
                a.spawn_food(x, 200.0);
                b.spawn_food(x, 200.0);
            }
            a.advance_to(step * 137);
            b.advance_to(step * 137);
        }

        assert_eq!(a.food(), b.food());
        for (fa, fb) in a.fish().iter().zip(b.fish()) {
            assert_eq!(fa.pos(), fb.pos());
            assert_eq!(fa.dir(), fb.dir());
        }
    }

    #[test]
    fn test_shutdown_releases_timers() {
        let mut tank = Tank::new(5, view(), 0);
        tank.spawn_food(200.0, 200.0);
        assert!(tank.active_timers() > 0);

        tank.shutdown();
        assert!(!tank.is_running());
        assert_eq!(tank.active_timers(), 0);

        let positions: Vec<Vec2> = tank.fish().iter().map(|f| f.pos()).collect();
        tank.advance_to(10_000);
        assert_eq!(tank.now(), 10_000);
        let after: Vec<Vec2> = tank.fish().iter().map(|f| f.pos()).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_viewport_update_moves_bounds() {
        let mut tank = Tank::new(8, view(), 0);
        tank.advance_to(500);
        tank.set_viewport(Viewport::new(300.0, 250.0));
        tank.advance_to(550);

        let bounds = tank.viewport().swim_bounds();
        for fish in tank.fish() {
            assert!(bounds.contains(fish.pos()), "{:?} outside {:?}", fish.pos(), bounds);
        }
    }
}
