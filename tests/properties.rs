//! Property tests for the physics and pacing rules

use bunny_brave::consts::*;
use bunny_brave::sim::{Aabb, Body, Flame, Platform, integrate_vertical, spawn_cooldown_at};
use bunny_brave::tuning::Tuning;
use glam::Vec2;
use proptest::prelude::*;

proptest! {
    #[test]
    fn resting_body_never_moves(
        platform_index in 0usize..FLOATING_PLATFORMS.len(),
        offset in -80.0f32..80.0,
        width in 20u32..100,
        height in 20u32..120,
        ticks in 1usize..200,
    ) {
        let (x, top) = FLOATING_PLATFORMS[platform_index];
        let platforms = vec![Platform::from_midtop(x, top)];
        let size = Vec2::new(width as f32, height as f32);
        let mut body = Body::new(Aabb::from_midbottom(x + offset, top, size));
        body.grounded = true;

        for _ in 0..ticks {
            let prev = body.rect.center.y;
            integrate_vertical(&mut body, prev, &platforms, 1.0);
            prop_assert!(body.grounded);
            prop_assert_eq!(body.rect.bottom(), top);
            prop_assert_eq!(body.vel.y, 0.0);
        }
    }

    #[test]
    fn falling_body_lands_on_surface(
        (speed, gap) in (1u32..=47).prop_flat_map(|v| (Just(v), 0..=v)),
        height in 20u32..120,
    ) {
        // Sprite extents are whole pixels, so anchors stay exact
        let platforms = vec![Platform::from_midtop(400.0, 500.0)];
        let size = Vec2::new(40.0, height as f32);
        let mut body = Body::new(Aabb::from_midbottom(400.0, 500.0 - gap as f32, size));
        body.vel.y = speed as f32;

        let prev = body.rect.center.y;
        integrate_vertical(&mut body, prev, &platforms, 1.0);
        prop_assert!(body.grounded);
        prop_assert_eq!(body.rect.bottom(), 500.0);
        prop_assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn body_that_clears_the_slab_in_one_step_falls_through(
        gap in 0u32..=10,
        height in 20u32..120,
        extra in 1u32..100,
    ) {
        // Faster than platform thickness plus body height: nothing overlaps after the move
        let platforms = vec![Platform::from_midtop(400.0, 500.0)];
        let thickness = PLATFORM_SIZE.y as u32;
        let speed = gap + height + thickness + extra;
        let size = Vec2::new(40.0, height as f32);
        let mut body = Body::new(Aabb::from_midbottom(400.0, 500.0 - gap as f32, size));
        body.vel.y = speed as f32;

        let prev = body.rect.center.y;
        integrate_vertical(&mut body, prev, &platforms, 1.0);
        prop_assert!(!body.grounded);
        prop_assert!(body.rect.top() > platforms[0].rect.bottom());
        prop_assert_eq!(body.vel.y, speed as f32 + 1.0);
    }

    #[test]
    fn spawn_cooldown_stays_within_bounds(base in 3.0f32..=8.0, elapsed in 0.0f32..600.0) {
        let ramp = 90.0;
        let cooldown = spawn_cooldown_at(base, elapsed, ramp);
        prop_assert!(cooldown <= base + 1e-4);
        prop_assert!(cooldown >= base / 2.0 - 1e-4);
        if elapsed >= ramp {
            prop_assert!((cooldown - base / 2.0).abs() < 1e-4);
        } else {
            let expected = base - (base / 2.0) * (elapsed / ramp);
            prop_assert!((cooldown - expected).abs() < 1e-3);
        }
        prop_assert!(spawn_cooldown_at(base, elapsed + 1.0, ramp) <= cooldown + 1e-4);
        prop_assert_eq!(spawn_cooldown_at(base, 0.0, ramp), base);
    }

    #[test]
    fn flame_bounce_scales_velocity(
        vy in 1.0f32..40.0,
        vx in prop::sample::select(vec![-3.0f32, 3.0]),
        gap_fraction in 0.0f32..0.99,
        max_bounces in 7u32..=8,
    ) {
        let tuning = Tuning::default();
        let platforms = vec![Platform::from_midtop(400.0, 500.0)];
        let mut flame = Flame {
            id: 1,
            rect: Aabb::from_midbottom(400.0, 500.0 - vy * gap_fraction, FLAME_SIZE),
            vel: Vec2::new(vx, vy),
            bounce_count: max_bounces - 1,
            max_bounces,
        };
        prop_assert!(!flame.should_despawn());

        flame.update(&platforms, &tuning);
        let expected_vy = -(vy + tuning.gravity) * tuning.flame_bounce_damping;
        prop_assert!((flame.vel.y - expected_vy).abs() < 1e-4);
        prop_assert!((flame.vel.x - vx * tuning.flame_horizontal_damping).abs() < 1e-5);
        prop_assert_eq!(flame.rect.bottom(), 500.0);
        prop_assert_eq!(flame.bounce_count, max_bounces);
        prop_assert!(flame.should_despawn());
    }
}
