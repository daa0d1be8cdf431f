//! The player: movement, jumping, the net attack and the carrot powerup

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::geom::Aabb;
use super::physics::{Body, Platform, integrate_vertical};
use super::state::GameEvent;
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{arc_point, wrap_horizontal};

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Net attack state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackState {
    pub active: bool,
    /// Seconds since the swing started
    pub timer: f32,
    /// Sweep progress 0..=1
    pub progress: f32,
    /// Seconds until another swing is allowed (may go negative)
    pub cooldown_timer: f32,
    /// Net sprite frame, follows progress
    pub net_frame: usize,
    /// Strike hitbox, only meaningful while `active`
    pub net: Option<Aabb>,
}

/// Result of a hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible: nothing happened
    Ignored,
    /// A life was lost and the player was sent back to spawn
    LifeLost { lives_left: u32 },
    /// Last life lost
    Died,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub jumping: bool,
    pub lives: u32,
    pub score: u64,
    pub collected_carrots: u32,
    pub invincible: bool,
    /// Seconds of invincibility elapsed
    pub powerup_timer: f32,
    pub attack: AttackState,
    pub anim: Animator,
    footstep_timer: f32,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            body: Body::new(Self::spawn_rect()),
            facing: Facing::Right,
            jumping: false,
            lives,
            score: 0,
            collected_carrots: 0,
            invincible: false,
            powerup_timer: 0.0,
            attack: AttackState::default(),
            anim: Animator::new(AnimClip::PlayerStand),
            footstep_timer: 0.0,
        }
    }

    fn spawn_rect() -> Aabb {
        Aabb::from_midbottom(PLAYER_SPAWN.x, PLAYER_SPAWN.y, PLAYER_SIZE)
    }

    #[inline]
    pub fn rect(&self) -> &Aabb {
        &self.body.rect
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.rect.center
    }

    /// Strike hitbox while a swing is in progress
    pub fn strike_hitbox(&self) -> Option<Aabb> {
        if self.attack.active { self.attack.net } else { None }
    }

    /// Advance one tick: input, attack, powerup, physics
    pub fn update(
        &mut self,
        input: &TickInput,
        dt: f32,
        platforms: &[Platform],
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        let prev_y = self.body.rect.center.y;
        self.attack.cooldown_timer -= dt;

        // Left and right are polled independently; holding both moves both ways
        let mut moving = false;
        if !self.attack.active {
            if input.right {
                self.body.rect.center.x += tuning.player_move_speed;
                self.facing = Facing::Right;
                moving = true;
            }
            if input.left {
                self.body.rect.center.x -= tuning.player_move_speed;
                self.facing = Facing::Left;
                moving = true;
            }
        }

        if moving && self.body.grounded {
            self.footstep_timer += dt;
            if self.footstep_timer >= tuning.footstep_interval {
                events.push(GameEvent::Footstep);
                self.footstep_timer = 0.0;
            }
        } else {
            self.footstep_timer = 0.0;
        }

        self.animate(dt, moving);
        self.body.rect.center.x = wrap_horizontal(self.body.rect.center.x, SCREEN_WIDTH);

        if input.jump && self.body.grounded && !self.attack.active {
            self.body.vel.y = tuning.jump_strength;
            self.jumping = true;
            self.body.grounded = false;
            self.anim.play(AnimClip::PlayerJump);
            events.push(GameEvent::Jumped);
        }

        if input.attack && !self.attack.active && self.attack.cooldown_timer <= 0.0 {
            self.start_attack(tuning);
            events.push(GameEvent::NetSwing);
        }
        if self.attack.active {
            self.update_attack(dt, tuning);
        }

        self.update_powerup(dt, tuning, events);
        integrate_vertical(&mut self.body, prev_y, platforms, tuning.gravity);
        if self.body.grounded {
            self.jumping = false;
        }

        // Falling out of the world wraps to the top
        if self.body.rect.center.y > SCREEN_HEIGHT {
            self.body.rect.center.y = 0.0;
            self.body.vel.y = 0.0;
            self.body.grounded = false;
            self.jumping = false;
        }
    }

    fn animate(&mut self, dt: f32, moving: bool) {
        if self.attack.active {
            return;
        }
        if self.jumping && !self.body.grounded {
            return;
        }
        if self.body.grounded {
            let clip = if moving {
                AnimClip::PlayerWalk
            } else {
                AnimClip::PlayerStand
            };
            self.anim.play(clip);
            self.anim.advance(dt);
        }
    }

    fn start_attack(&mut self, tuning: &Tuning) {
        self.attack.active = true;
        self.attack.timer = 0.0;
        self.attack.progress = 0.0;
        self.attack.net_frame = 0;
        self.attack.cooldown_timer = tuning.attack_cooldown;
        self.anim.play(AnimClip::PlayerAttack);
    }

    /// Sweep the net through a half circle around the player.
    ///
    /// Facing left sweeps 0 → π, facing right π → 0.
    fn update_attack(&mut self, dt: f32, tuning: &Tuning) {
        self.attack.timer += dt;
        let progress = (self.attack.timer / tuning.attack_duration).min(1.0);
        self.attack.progress = progress;

        let last_frame = AnimClip::NetSweep.frame_count() - 1;
        self.attack.net_frame = (progress * last_frame as f32) as usize;

        let (start, end) = match self.facing {
            Facing::Left => (0.0, std::f32::consts::PI),
            Facing::Right => (std::f32::consts::PI, 0.0),
        };
        let angle = start + (end - start) * progress;
        let radius = self.body.rect.size.y * tuning.net_radius_factor;
        let net_center = arc_point(self.body.rect.center, radius, angle);
        self.attack.net = Some(Aabb::from_center(net_center, NET_SIZE));

        if self.attack.timer >= tuning.attack_duration {
            self.attack.active = false;
            self.attack.net = None;
            self.anim.play(AnimClip::PlayerStand);
        }
    }

    fn update_powerup(&mut self, dt: f32, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.invincible {
            self.powerup_timer += dt;
            if self.powerup_timer >= tuning.powerup_duration {
                self.invincible = false;
                self.powerup_timer = 0.0;
                events.push(GameEvent::PowerUpExpired);
            }
        }
    }

    /// Count a carrot; returns true when this one triggered the powerup
    pub fn collect_carrot(&mut self, tuning: &Tuning) -> bool {
        self.collected_carrots += 1;
        if self.collected_carrots >= tuning.powerup_carrots_required {
            self.activate_powerup();
            true
        } else {
            false
        }
    }

    fn activate_powerup(&mut self) {
        self.invincible = true;
        self.powerup_timer = 0.0;
        self.collected_carrots = 0;
    }

    /// Apply one hit. Invincibility swallows it entirely.
    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.invincible {
            return DamageOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        self.collected_carrots = 0;
        if self.lives == 0 {
            return DamageOutcome::Died;
        }
        self.respawn();
        DamageOutcome::LifeLost {
            lives_left: self.lives,
        }
    }

    /// Back to the spawn point with vertical motion reset
    fn respawn(&mut self) {
        self.body = Body::new(Self::spawn_rect());
        self.jumping = false;
    }

    /// Powerup charge as a fraction of the carrots required
    pub fn powerup_progress(&self, tuning: &Tuning) -> f32 {
        (self.collected_carrots as f32 / tuning.powerup_carrots_required as f32).min(1.0)
    }

    /// Seconds of invincibility left (0 when vulnerable)
    pub fn invincibility_remaining(&self, tuning: &Tuning) -> f32 {
        if self.invincible {
            (tuning.powerup_duration - self.powerup_timer).max(0.0)
        } else {
            0.0
        }
    }
}
