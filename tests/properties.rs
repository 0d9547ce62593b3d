use fish_tank::consts::*;
use fish_tank::sim::{Fish, FishKind, FishSize, FoodId, FoodParticle, Tank, Viewport};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

prop_compose! {
    fn arb_viewport()(
        width in 60.0f32..2400.0,
        height in 120.0f32..1600.0
    ) -> Viewport {
        Viewport::new(width, height)
    }
}

prop_compose! {
    /// (delay since previous feeding, x, y)
    fn arb_feedings(max: usize)(
        feedings in prop::collection::vec((0u64..3000, -50.0f32..1500.0, -50.0f32..1000.0), 0..max)
    ) -> Vec<(u64, f32, f32)> {
        feedings
    }
}

prop_compose! {
    fn arb_kind()(
        size in prop_oneof![Just(FishSize::Small), Just(FishSize::Medium), Just(FishSize::Large)],
        speed in 0.5f32..5.0
    ) -> FishKind {
        FishKind::new(0x4ECDC4, size, speed)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_fish_never_leave_swim_area(
        seed in any::<u64>(),
        view in arb_viewport(),
        feedings in arb_feedings(12)
    ) {
        let mut tank = Tank::new(seed, view, 0);
        let bounds = view.swim_bounds();
        let mut now = 0;

        for (delay, x, y) in feedings {
            // Check at every fish tick across the gap
            let until = now + delay;
            while now < until {
                now = (now + FISH_TICK_MS).min(until);
                tank.advance_to(now);
                for fish in tank.fish() {
                    prop_assert!(bounds.contains(fish.pos()), "{:?} outside {:?}", fish.pos(), bounds);
                }
            }
            tank.spawn_food(x, y);
        }

        tank.advance_to(now + 2_000);
        for fish in tank.fish() {
            prop_assert!(bounds.contains(fish.pos()));
        }
    }

    #[test]
    fn test_food_gone_within_five_seconds(
        seed in any::<u64>(),
        height in 120.0f32..20_000.0,
        feedings in arb_feedings(10)
    ) {
        let mut tank = Tank::new(seed, Viewport::new(1000.0, height), 0);
        let mut spawned: Vec<(FoodId, u64)> = Vec::new();
        let mut now = 0;

        for (delay, x, y) in feedings {
            now += delay;
            tank.advance_to(now);
            spawned.push((tank.spawn_food(x, y), now));
        }

        for (id, created_at) in spawned {
            tank.advance_to(created_at + FOOD_TIMEOUT_MS);
            prop_assert!(tank.food().iter().all(|f| f.id != id), "{} outlived its timeout", id);
        }
    }

    #[test]
    fn test_food_ids_strictly_increase(count in 0usize..200) {
        let mut tank = Tank::empty(1, Viewport::default(), 0);
        let ids: Vec<FoodId> = (0..count).map(|i| tank.spawn_food(i as f32, 10.0)).collect();

        prop_assert_eq!(ids.len(), count);
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let listed: Vec<FoodId> = tank.food().iter().map(|f| f.id).collect();
        prop_assert_eq!(listed, ids);
    }

    #[test]
    fn test_food_in_sight_acquired_in_one_tick(
        kind in arb_kind(),
        seed in any::<u64>(),
        angle in 0.0f32..std::f32::consts::TAU,
        distance in (REACH_RADIUS + 1.0)..(SIGHT_RADIUS - 0.5)
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let view = Viewport::new(2000.0, 2000.0);
        let start = Vec2::new(1000.0, 1000.0);
        let mut fish = Fish::new(kind, start, Vec2::ZERO, 0);
        prop_assume!(fish.target().is_none());

        let spot = start + Vec2::from_angle(angle) * distance;
        let food = [FoodParticle { id: FoodId(3), x: spot.x, y: spot.y, created_at: 0 }];
        fish.steer(&food, view, &mut rng);

        let target = fish.target();
        prop_assert!(target.is_some());
        prop_assert_eq!(target.map(|t| t.id), Some(FoodId(3)));
    }

    #[test]
    fn test_reached_target_cleared_same_tick(
        kind in arb_kind(),
        seed in any::<u64>(),
        offset in 25.0f32..140.0
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let view = Viewport::new(2000.0, 2000.0);
        let mut fish = Fish::new(kind, Vec2::new(1000.0, 1000.0), Vec2::ZERO, 0);
        let food_pos = Vec2::new(1000.0 + offset, 1000.0);
        let food = [FoodParticle { id: FoodId(0), x: food_pos.x, y: food_pos.y, created_at: 0 }];

        for _ in 0..200 {
            let reached = fish
                .target()
                .map(|t| t.pos.distance(fish.pos()) < REACH_RADIUS)
                .unwrap_or(false);
            fish.steer(&food, view, &mut rng);
            if reached {
                prop_assert!(fish.target().is_none());
                return Ok(());
            }
        }
        prop_assert!(false, "fish never reached food {} px away", offset);
    }

    #[test]
    fn test_same_seed_same_tank(seed in any::<u64>(), feedings in arb_feedings(8)) {
        let view = Viewport::new(1280.0, 720.0);
        let mut a = Tank::new(seed, view, 0);
        let mut b = Tank::new(seed, view, 0);
        let mut now = 0;

        for (delay, x, y) in feedings {
            now += delay;
            a.advance_to(now);
            b.advance_to(now);
            a.spawn_food(x, y);
            b.spawn_food(x, y);
        }
        a.advance_to(now + 1_000);
        b.advance_to(now + 1_000);

        prop_assert_eq!(a.food(), b.food());
        for (fa, fb) in a.fish().iter().zip(b.fish()) {
            prop_assert_eq!(fa.pos(), fb.pos());
            prop_assert_eq!(fa.facing(), fb.facing());
        }
    }
}

#[test]
fn test_pellet_lives_until_timeout() {
    // Floor far below, so only the timeout and the sweep can remove it
    let mut tank = Tank::empty(3, Viewport::new(800.0, 100_000.0), 0);
    tank.spawn_food(400.0, 10.0);
    tank.advance_to(4_999);
    assert_eq!(tank.food().len(), 1);
    tank.advance_to(6_000);
    assert!(tank.food().is_empty());
}

#[test]
fn test_threshold_scenario() {
    // Food at (100,100), fish at (120,100): locked, not yet reached
    let mut tank = Tank::empty(11, Viewport::new(1024.0, 768.0), 0);
    let kind = FishKind::new(0xFF6B35, FishSize::Medium, 2.0);
    tank.insert_fish(Fish::new(kind, Vec2::new(120.0, 100.0), Vec2::ZERO, 0));

    tank.spawn_food(100.0, 100.0);
    tank.advance_to(FISH_TICK_MS);

    let target = tank.fish()[0].target().expect("target locked");
    assert_eq!(target.pos, Vec2::new(100.0, 100.0));
}
