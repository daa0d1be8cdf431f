//! The sun boss
//!
//! Lifecycle: descend from above the screen, then loop between attacking,
//! taking hits and repositioning until the hit count reaches max hp.
//! Flames are owned by the session; the boss only decides when and how many.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::geom::Aabb;
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of a net hit on the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHitOutcome {
    /// Invincible: the hit did not count
    Ignored,
    /// Hit counted; the boss is now invincible and repositioning
    Hurt { hits_taken: u32 },
    /// Final hit
    Defeated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub rect: Aabb,
    pub descending: bool,
    pub hits_taken: u32,
    pub max_hp: u32,
    pub invincible: bool,
    /// Seconds since the last counted hit
    pub invincibility_timer: f32,
    pub repositioning: bool,
    pub target_x: f32,
    pub vx: f32,
    /// Seconds until the next burst (may go negative while the flame cap is full)
    pub attack_timer: f32,
    pub anim: Animator,
}

impl Boss {
    pub fn new(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let rect = Aabb::from_midtop(SCREEN_WIDTH / 2.0, BOSS_SPAWN_TOP, BOSS_SIZE);
        Self {
            target_x: rect.center.x,
            rect,
            descending: true,
            hits_taken: 0,
            max_hp: tuning.boss_max_hp,
            invincible: false,
            invincibility_timer: 0.0,
            repositioning: false,
            vx: 0.0,
            attack_timer: Self::draw_attack_interval(rng, tuning),
            anim: Animator::new(AnimClip::Boss),
        }
    }

    fn draw_attack_interval(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
        rng.random_range(tuning.boss_attack_interval_min..=tuning.boss_attack_interval_max)
    }

    /// Damage hitbox, smaller than the sprite
    pub fn hitbox(&self, tuning: &Tuning) -> Aabb {
        self.rect.inset(tuning.boss_hitbox_inset)
    }

    /// Where flames are launched from (bottom-center)
    pub fn launch_origin(&self) -> glam::Vec2 {
        self.rect.midbottom()
    }

    /// Advance one tick. Returns how many flames to launch this tick.
    pub fn update(
        &mut self,
        dt: f32,
        live_flames: usize,
        rng: &mut Pcg32,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) -> usize {
        self.anim.advance(dt);

        if self.descending {
            self.rect.center.y += tuning.boss_descent_speed;
            if self.rect.center.y >= tuning.boss_target_altitude {
                self.rect.center.y = tuning.boss_target_altitude;
                self.descending = false;
                events.push(GameEvent::BossArriving);
                log::debug!("Boss arrived at x={:.0}", self.rect.center.x);
            }
            return 0;
        }

        if self.repositioning {
            if (self.rect.center.x - self.target_x).abs() < tuning.boss_snap_distance {
                self.rect.center.x = self.target_x;
                self.vx = 0.0;
                self.repositioning = false;
            } else {
                self.rect.center.x += self.vx;
            }
        }

        if self.invincible {
            self.invincibility_timer += dt;
            if self.invincibility_timer >= tuning.boss_invincibility_duration {
                self.invincible = false;
                self.invincibility_timer = 0.0;
            }
        }

        if self.invincible || self.repositioning {
            return 0;
        }
        self.attack_timer -= dt;
        if self.attack_timer > 0.0 || live_flames >= tuning.boss_max_flames {
            return 0;
        }
        self.attack_timer = Self::draw_attack_interval(rng, tuning);
        let burst = if rng.random_bool(0.5) { 2 } else { 3 };
        burst.min(tuning.boss_max_flames - live_flames)
    }

    /// Apply a net hit
    pub fn take_damage(&mut self, rng: &mut Pcg32, tuning: &Tuning) -> BossHitOutcome {
        if self.invincible {
            return BossHitOutcome::Ignored;
        }
        self.hits_taken += 1;
        self.invincible = true;
        self.invincibility_timer = 0.0;
        if self.hits_taken >= self.max_hp {
            return BossHitOutcome::Defeated;
        }

        let half_w = self.rect.size.x / 2.0;
        self.target_x = rng.random_range(half_w..=SCREEN_WIDTH - half_w);
        self.vx = if self.target_x > self.rect.center.x {
            tuning.boss_reposition_speed
        } else {
            -tuning.boss_reposition_speed
        };
        self.repositioning = true;
        BossHitOutcome::Hurt {
            hits_taken: self.hits_taken,
        }
    }

    /// Seconds of invincibility left (0 when vulnerable)
    pub fn invincibility_remaining(&self, tuning: &Tuning) -> f32 {
        if self.invincible {
            (tuning.boss_invincibility_duration - self.invincibility_timer).max(0.0)
        } else {
            0.0
        }
    }
}
