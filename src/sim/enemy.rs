//! Ground and flying enemies
//!
//! Both chase the player along each axis independently until the prelude
//! sends them fleeing toward the nearer screen edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::geom::Aabb;
use super::physics::{Body, Platform, integrate_vertical};
use crate::axis_sign_toward;
use crate::consts::*;
use crate::tuning::Tuning;

/// Archetype-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks along platforms toward the player
    Ground,
    /// Sits on the ground for `ground_timer` seconds, then flies for good
    Flying { ground_timer: f32, airborne: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub fleeing: bool,
    pub anim: Animator,
}

impl Enemy {
    /// Ground enemy hanging from `(x, top)`
    pub fn ground(id: u32, x: f32, top: f32) -> Self {
        Self {
            id,
            kind: EnemyKind::Ground,
            body: Body::new(Aabb::from_midtop(x, top, GROUND_ENEMY_SIZE)),
            fleeing: false,
            anim: Animator::new(AnimClip::GroundEnemyWalk),
        }
    }

    /// Flying enemy hanging from `(x, top)`, grounded for `ground_time` seconds
    pub fn flying(id: u32, x: f32, top: f32, ground_time: f32) -> Self {
        Self {
            id,
            kind: EnemyKind::Flying {
                ground_timer: ground_time,
                airborne: false,
            },
            body: Body::new(Aabb::from_midtop(x, top, FLYING_ENEMY_SIZE)),
            fleeing: false,
            anim: Animator::new(AnimClip::FlyerStand),
        }
    }

    #[inline]
    pub fn rect(&self) -> &Aabb {
        &self.body.rect
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.kind, EnemyKind::Flying { airborne: true, .. })
    }

    /// Pick a flee direction toward the nearer screen edge and keep it
    pub fn start_fleeing(&mut self, flee_speed: f32) {
        self.fleeing = true;
        self.body.vel.x = if self.body.rect.center.x < SCREEN_WIDTH / 2.0 {
            -flee_speed
        } else {
            flee_speed
        };
    }

    /// Advance one tick toward `target` (the player's center)
    pub fn update(&mut self, target: Vec2, dt: f32, platforms: &[Platform], tuning: &Tuning) {
        match self.kind {
            EnemyKind::Ground => self.update_ground(target, platforms, tuning),
            EnemyKind::Flying { .. } => self.update_flying(target, dt, platforms, tuning),
        }
        self.animate(dt);
    }

    fn update_ground(&mut self, target: Vec2, platforms: &[Platform], tuning: &Tuning) {
        let prev_y = self.body.rect.center.y;
        if self.body.grounded {
            if !self.fleeing {
                self.body.vel.x = axis_sign_toward(self.body.rect.center.x, target.x) * tuning.enemy_follow_speed;
            } else if self.body.vel.x == 0.0 {
                self.start_fleeing(tuning.flee_speed);
            }
            self.body.rect.center.x += self.body.vel.x;
        }
        integrate_vertical(&mut self.body, prev_y, platforms, tuning.gravity);
    }

    fn update_flying(&mut self, target: Vec2, dt: f32, platforms: &[Platform], tuning: &Tuning) {
        let EnemyKind::Flying {
            mut ground_timer,
            mut airborne,
        } = self.kind
        else {
            return;
        };

        if self.fleeing {
            if self.body.vel.x == 0.0 {
                self.start_fleeing(tuning.flee_speed);
            }
            self.body.rect.center += self.body.vel;
            self.body.vel.y += tuning.gravity;
        } else if !airborne {
            let prev_y = self.body.rect.center.y;
            integrate_vertical(&mut self.body, prev_y, platforms, tuning.gravity);
            ground_timer -= dt;
            if ground_timer <= 0.0 {
                airborne = true;
                self.body.vel.y = 0.0;
                self.body.grounded = false;
            }
        } else {
            // Axis-aligned chase: diagonals are faster than straight lines
            let here = self.body.rect.center;
            self.body.vel = Vec2::new(
                axis_sign_toward(here.x, target.x),
                axis_sign_toward(here.y, target.y),
            ) * tuning.flyer_follow_speed;
            self.body.rect.center += self.body.vel;
        }

        self.kind = EnemyKind::Flying {
            ground_timer,
            airborne,
        };
    }

    fn animate(&mut self, dt: f32) {
        match self.kind {
            EnemyKind::Ground => {
                if self.body.vel.x == 0.0 {
                    self.anim.set_frame(0);
                } else {
                    self.anim.advance(dt);
                }
            }
            EnemyKind::Flying { airborne, .. } => {
                let clip = if airborne && !self.fleeing {
                    AnimClip::FlyerFly
                } else {
                    AnimClip::FlyerStand
                };
                self.anim.play(clip);
                self.anim.advance(dt);
            }
        }
    }

    /// Fell out of the world, or fled fully past a screen edge
    pub fn should_despawn(&self, tuning: &Tuning) -> bool {
        let fell = self.body.rect.center.y > SCREEN_HEIGHT + tuning.despawn_margin;
        let fled = self.fleeing && self.body.rect.is_off_screen_horizontally(SCREEN_WIDTH);
        fell || fled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Vec<Platform> {
        vec![Platform::from_midtop(600.0, 500.0)]
    }

    fn settle(enemy: &mut Enemy) {
        enemy.body.rect.set_bottom(500.0);
        enemy.body.grounded = true;
    }

    #[test]
    fn test_ground_enemy_follows_player() {
        let tuning = Tuning::default();
        let platforms = floor();
        let mut enemy = Enemy::ground(1, 600.0, 0.0);
        settle(&mut enemy);

        enemy.update(Vec2::new(900.0, 450.0), 0.016, &platforms, &tuning);
        assert_eq!(enemy.body.vel.x, tuning.enemy_follow_speed);
        assert_eq!(enemy.rect().center.x, 603.0);
        assert!(enemy.body.grounded);

        enemy.update(Vec2::new(100.0, 450.0), 0.016, &platforms, &tuning);
        assert_eq!(enemy.body.vel.x, -tuning.enemy_follow_speed);

        enemy.update(Vec2::new(600.0, 450.0), 0.016, &platforms, &tuning);
        assert_eq!(enemy.body.vel.x, 0.0);
    }

    #[test]
    fn test_airborne_ground_enemy_does_not_steer() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::ground(1, 600.0, 0.0);
        enemy.update(Vec2::new(900.0, 450.0), 0.016, &[], &tuning);
        assert_eq!(enemy.rect().center.x, 600.0);
        assert_eq!(enemy.body.vel.y, tuning.gravity);
    }

    #[test]
    fn test_flee_toward_nearer_edge() {
        let tuning = Tuning::default();
        let mut left = Enemy::ground(1, 300.0, 0.0);
        left.start_fleeing(tuning.flee_speed);
        assert_eq!(left.body.vel.x, -tuning.flee_speed);

        let mut right = Enemy::flying(2, 1000.0, 0.0, 4.0);
        right.start_fleeing(tuning.flee_speed);
        assert_eq!(right.body.vel.x, tuning.flee_speed);
    }

    #[test]
    fn test_fleeing_direction_is_held() {
        let tuning = Tuning::default();
        let platforms = floor();
        let mut enemy = Enemy::ground(1, 600.0, 0.0);
        settle(&mut enemy);
        enemy.start_fleeing(tuning.flee_speed);
        let vx = enemy.body.vel.x;
        for _ in 0..5 {
            enemy.update(Vec2::new(1200.0, 450.0), 0.016, &platforms, &tuning);
            assert_eq!(enemy.body.vel.x, vx);
        }
    }

    #[test]
    fn test_flyer_takes_off_after_ground_time() {
        let tuning = Tuning::default();
        let platforms = floor();
        let mut enemy = Enemy::flying(1, 600.0, 0.0, 1.0);
        settle(&mut enemy);

        for _ in 0..3 {
            enemy.update(Vec2::new(900.0, 100.0), 0.25, &platforms, &tuning);
            assert!(!enemy.is_airborne());
            assert_eq!(enemy.rect().center.x, 600.0);
        }
        enemy.update(Vec2::new(900.0, 100.0), 0.25, &platforms, &tuning);
        assert!(enemy.is_airborne());
        assert_eq!(enemy.body.vel.y, 0.0);

        // Diagonal chase moves both axes at full speed
        let before = enemy.rect().center;
        enemy.update(Vec2::new(900.0, 100.0), 0.25, &platforms, &tuning);
        let moved = enemy.rect().center - before;
        assert_eq!(moved, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_fleeing_flyer_falls() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::flying(1, 1000.0, 100.0, 0.0);
        enemy.kind = EnemyKind::Flying {
            ground_timer: 0.0,
            airborne: true,
        };
        enemy.start_fleeing(tuning.flee_speed);
        enemy.update(Vec2::ZERO, 0.016, &[], &tuning);
        enemy.update(Vec2::ZERO, 0.016, &[], &tuning);
        assert_eq!(enemy.body.vel.y, 2.0 * tuning.gravity);
        assert_eq!(enemy.rect().center.x, 1016.0);
    }

    #[test]
    fn test_despawn_rules() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::ground(1, 600.0, 0.0);
        assert!(!enemy.should_despawn(&tuning));

        enemy.body.rect.center.y = SCREEN_HEIGHT + tuning.despawn_margin + 1.0;
        assert!(enemy.should_despawn(&tuning));

        let mut runner = Enemy::ground(2, -40.0, 300.0);
        assert!(!runner.should_despawn(&tuning));
        runner.fleeing = true;
        assert!(runner.should_despawn(&tuning));
    }
}
