//! Cloud spawner: patrols the sky and drops enemies on a shrinking cooldown

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which archetype a spawn produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Ground,
    Flying,
}

/// A spawn the session should materialize this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    /// Top-center anchor of the new enemy
    pub x: f32,
    pub top: f32,
}

/// Cooldown after `elapsed` seconds of play.
///
/// Linear from `base` at 0s down to `base / 2` at `ramp` seconds, flat after.
pub fn spawn_cooldown_at(base: f32, elapsed: f32, ramp: f32) -> f32 {
    let min = base / 2.0;
    let difficulty = (elapsed / ramp).clamp(0.0, 1.0);
    base - (base - min) * difficulty
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSpawner {
    pub rect: Aabb,
    pub vx: f32,
    /// Cooldown drawn at creation; the live cooldown scales down from it
    pub base_cooldown: f32,
    pub spawn_cooldown: f32,
    /// Seconds until the next drop
    pub spawn_timer: f32,
    pub fleeing: bool,
}

impl CloudSpawner {
    pub fn new(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let vx = if rng.random_bool(0.5) {
            tuning.cloud_speed
        } else {
            -tuning.cloud_speed
        };
        let base_cooldown = rng.random_range(tuning.spawn_cooldown_min..=tuning.spawn_cooldown_max);
        Self {
            rect: Aabb::from_midtop(CLOUD_SPAWN.x, CLOUD_SPAWN.y, CLOUD_SIZE),
            vx,
            base_cooldown,
            spawn_cooldown: base_cooldown,
            spawn_timer: 0.0,
            fleeing: false,
        }
    }

    /// Head for the nearer screen edge; spawning stops for good
    pub fn start_fleeing(&mut self, flee_speed: f32) {
        self.fleeing = true;
        self.vx = if self.rect.center.x < SCREEN_WIDTH / 2.0 {
            -flee_speed
        } else {
            flee_speed
        };
    }

    /// Patrol and count down. Returns a spawn when the cooldown expires.
    pub fn update(&mut self, dt: f32, elapsed: f32, rng: &mut Pcg32, tuning: &Tuning) -> Option<SpawnRequest> {
        self.rect.center.x += self.vx;
        if self.fleeing {
            return None;
        }
        if self.rect.center.x > SCREEN_WIDTH || self.rect.center.x < 0.0 {
            self.vx = -self.vx;
        }

        self.spawn_cooldown = spawn_cooldown_at(self.base_cooldown, elapsed, tuning.difficulty_ramp);
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return None;
        }
        self.spawn_timer = self.spawn_cooldown;

        let kind = if rng.random_bool(0.5) {
            SpawnKind::Ground
        } else {
            SpawnKind::Flying
        };
        Some(SpawnRequest {
            kind,
            x: self.rect.center.x,
            top: self.rect.bottom(),
        })
    }

    /// Fleeing and entirely past an edge
    pub fn has_left_screen(&self) -> bool {
        self.fleeing && self.rect.is_off_screen_horizontally(SCREEN_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_cooldown_ramp() {
        assert_eq!(spawn_cooldown_at(6.0, 0.0, 90.0), 6.0);
        assert_eq!(spawn_cooldown_at(6.0, 45.0, 90.0), 4.5);
        assert_eq!(spawn_cooldown_at(6.0, 90.0, 90.0), 3.0);
        assert_eq!(spawn_cooldown_at(6.0, 500.0, 90.0), 3.0);
    }

    #[test]
    fn test_first_tick_spawns_then_waits() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut cloud = CloudSpawner::new(&mut rng, &tuning);
        assert!((3.0..=8.0).contains(&cloud.base_cooldown));

        let first = cloud.update(0.016, 0.016, &mut rng, &tuning);
        let spawn = first.expect("first tick spawns");
        assert_eq!(spawn.top, cloud.rect.bottom());
        assert_eq!(spawn.x, cloud.rect.center.x);
        assert!(cloud.update(0.016, 0.032, &mut rng, &tuning).is_none());
    }

    #[test]
    fn test_patrol_reverses_at_edges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut cloud = CloudSpawner::new(&mut rng, &tuning);
        cloud.rect.center.x = SCREEN_WIDTH - 1.0;
        cloud.vx = tuning.cloud_speed;
        cloud.update(0.016, 1.0, &mut rng, &tuning);
        assert_eq!(cloud.vx, -tuning.cloud_speed);
    }

    #[test]
    fn test_fleeing_never_spawns_and_leaves() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut cloud = CloudSpawner::new(&mut rng, &tuning);
        cloud.rect.center.x = 1000.0;
        cloud.start_fleeing(tuning.flee_speed);
        assert_eq!(cloud.vx, tuning.flee_speed);

        let mut ticks = 0;
        while !cloud.has_left_screen() {
            assert!(cloud.update(1.0, 10.0, &mut rng, &tuning).is_none());
            ticks += 1;
            assert!(ticks < 200);
        }
        assert!(cloud.rect.left() > SCREEN_WIDTH);
    }
}
