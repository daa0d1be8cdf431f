//! Boss projectile: a bouncing fireball that loses energy on every platform hit

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::physics::Platform;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_horizontal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flame {
    pub id: u32,
    pub rect: Aabb,
    pub vel: Vec2,
    pub bounce_count: u32,
    pub max_bounces: u32,
}

impl Flame {
    /// Launch from `origin` (top-center anchor) with a random lob
    pub fn launch(id: u32, origin: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let vx = if rng.random_bool(0.5) {
            tuning.flame_speed_x
        } else {
            -tuning.flame_speed_x
        };
        let vy = rng.random_range(tuning.flame_launch_vy_min..=tuning.flame_launch_vy_max);
        let max_bounces = rng.random_range(tuning.flame_bounces_min..=tuning.flame_bounces_max);
        Self {
            id,
            rect: Aabb::from_midtop(origin.x, origin.y, FLAME_SIZE),
            vel: Vec2::new(vx, vy),
            bounce_count: 0,
            max_bounces,
        }
    }

    /// Ballistic step, then at most one bounce off the first platform hit
    pub fn update(&mut self, platforms: &[Platform], tuning: &Tuning) {
        let prev_bottom = self.rect.bottom();
        self.rect.center += self.vel;
        self.vel.y += tuning.gravity;
        self.rect.center.x = wrap_horizontal(self.rect.center.x, SCREEN_WIDTH);

        if self.vel.y <= 0.0 {
            return;
        }
        let hit = platforms
            .iter()
            .find(|p| self.rect.overlaps(&p.rect) && prev_bottom <= p.rect.bottom());
        if let Some(platform) = hit {
            self.rect.set_bottom(platform.rect.top());
            self.vel.y *= -tuning.flame_bounce_damping;
            self.vel.x *= tuning.flame_horizontal_damping;
            self.bounce_count += 1;
        }
    }

    /// Worn out or fell out of the world
    pub fn should_despawn(&self) -> bool {
        self.bounce_count >= self.max_bounces || self.rect.center.y > SCREEN_HEIGHT
    }
}
