//! Frame snapshots for an external renderer
//!
//! The crate does not draw. `build_frame` flattens the session into an
//! ordered list of sprite descriptors (back to front) plus the few derived
//! values a frontend needs: background tint, warning banner, HUD numbers.

use glam::Vec2;
use serde::Serialize;

use crate::blink_visible;
use crate::settings::Settings;
use crate::sim::anim::AnimClip;
use crate::sim::collectible::CoinTier;
use crate::sim::enemy::EnemyKind;
use crate::sim::player::Facing;
use crate::sim::state::{EncounterPhase, GameState, HudTelemetry};

/// Background tint at the start of a run
const SKY_START: [f32; 3] = [0.0, 139.0, 139.0];
/// Background tint when the boss is due
const SKY_END: [f32; 3] = [173.0, 255.0, 47.0];
/// Seconds over which the tint blends
const SKY_TRANSITION: f32 = 120.0;

/// Flicker rates (toggles per second / 2)
const PLAYER_FLICKER_RATE: f32 = 5.0;
const BOSS_FLICKER_RATE: f32 = 2.5;
const BANNER_BLINK_RATE: f32 = 2.0;

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Platform,
    Coin(CoinTier),
    Carrot,
    Net,
    Player,
    Cloud,
    GroundEnemy,
    FlyingEnemy,
    Boss,
    Flame,
}

/// One sprite instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawDescriptor {
    pub sprite: SpriteKind,
    /// Sprite center in screen space
    pub pos: Vec2,
    pub clip: AnimClip,
    pub frame: usize,
    /// Mirror horizontally (sprites are authored facing right)
    pub flip_x: bool,
    /// False during the off phase of a flicker
    pub visible: bool,
}

impl DrawDescriptor {
    fn new(sprite: SpriteKind, pos: Vec2, clip: AnimClip, frame: usize) -> Self {
        Self {
            sprite,
            pos,
            clip,
            frame,
            flip_x: false,
            visible: true,
        }
    }
}

/// Everything a frontend needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: EncounterPhase,
    /// RGBA, 0..=1
    pub background: [f32; 4],
    /// Sky blend factor, 0..=1
    pub sky_progress: f32,
    /// Back to front
    pub sprites: Vec<DrawDescriptor>,
    /// Prelude warning banner shown this frame
    pub warning_banner: bool,
    pub menu_selection: usize,
    pub hud: HudTelemetry,
}

/// Snapshot with default settings
pub fn build_frame(state: &GameState) -> FrameSnapshot {
    build_frame_with(state, &Settings::default())
}

/// Snapshot honoring player preferences (reduced motion disables flicker)
pub fn build_frame_with(state: &GameState, settings: &Settings) -> FrameSnapshot {
    let sky_progress = (state.elapsed / SKY_TRANSITION).min(1.0);
    let blink = |timer: f32, rate: f32| settings.reduced_motion || blink_visible(timer, rate);

    let sprites = if state.phase.is_in_play() {
        collect_sprites(state, &blink)
    } else {
        Vec::new()
    };

    FrameSnapshot {
        phase: state.phase,
        background: sky_color(sky_progress),
        sky_progress,
        sprites,
        warning_banner: state.phase == EncounterPhase::BossPrelude
            && blink(state.prelude_timer, BANNER_BLINK_RATE),
        menu_selection: state.menu_selection,
        hud: state.hud(),
    }
}

fn sky_color(progress: f32) -> [f32; 4] {
    let mix = |i: usize| (SKY_START[i] + (SKY_END[i] - SKY_START[i]) * progress).floor() / 255.0;
    [mix(0), mix(1), mix(2), 1.0]
}

fn collect_sprites(state: &GameState, blink: &dyn Fn(f32, f32) -> bool) -> Vec<DrawDescriptor> {
    let mut out = Vec::with_capacity(
        state.platforms.len() + state.coins.len() + state.carrots.len() + state.enemies.len() + 8,
    );

    for platform in &state.platforms {
        out.push(DrawDescriptor::new(
            SpriteKind::Platform,
            platform.rect.center,
            AnimClip::Platform,
            0,
        ));
    }
    for coin in &state.coins {
        out.push(DrawDescriptor::new(
            SpriteKind::Coin(coin.tier),
            coin.rect.center,
            coin.anim.clip,
            coin.anim.frame,
        ));
    }
    for carrot in &state.carrots {
        out.push(DrawDescriptor::new(SpriteKind::Carrot, carrot.rect.center, AnimClip::Carrot, 0));
    }

    // Net, then player
    let player = &state.player;
    let facing_left = player.facing == Facing::Left;
    if let Some(net) = player.strike_hitbox() {
        let mut d = DrawDescriptor::new(SpriteKind::Net, net.center, AnimClip::NetSweep, player.attack.net_frame);
        d.flip_x = facing_left;
        out.push(d);
    }
    let mut d = DrawDescriptor::new(SpriteKind::Player, player.center(), player.anim.clip, player.anim.frame);
    d.flip_x = facing_left;
    d.visible = !player.invincible || blink(player.powerup_timer, PLAYER_FLICKER_RATE);
    out.push(d);

    if state.phase == EncounterPhase::BossFight {
        if let Some(boss) = &state.boss {
            let mut d = DrawDescriptor::new(SpriteKind::Boss, boss.rect.center, boss.anim.clip, boss.anim.frame);
            d.visible = !boss.invincible || blink(boss.invincibility_timer, BOSS_FLICKER_RATE);
            out.push(d);
        }
        for flame in &state.flames {
            let mut d = DrawDescriptor::new(SpriteKind::Flame, flame.rect.center, AnimClip::Flame, 0);
            d.flip_x = flame.vel.x < 0.0;
            out.push(d);
        }
    } else {
        for spawner in &state.spawners {
            out.push(DrawDescriptor::new(SpriteKind::Cloud, spawner.rect.center, AnimClip::Cloud, 0));
        }
        for enemy in &state.enemies {
            let sprite = match enemy.kind {
                EnemyKind::Ground => SpriteKind::GroundEnemy,
                EnemyKind::Flying { .. } => SpriteKind::FlyingEnemy,
            };
            let mut d = DrawDescriptor::new(sprite, enemy.rect().center, enemy.anim.clip, enemy.anim.frame);
            d.flip_x = enemy.body.vel.x < 0.0;
            out.push(d);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(12, Tuning::default());
        state.reset_session();
        state
    }

    #[test]
    fn test_menu_has_no_sprites() {
        let state = GameState::new(1, Tuning::default());
        let frame = build_frame(&state);
        assert!(frame.sprites.is_empty());
        assert_eq!(frame.phase, EncounterPhase::MainMenu);
    }

    #[test]
    fn test_draw_order_platforms_first_enemies_last() {
        let state = playing();
        let frame = build_frame(&state);
        let platforms = state.platforms.len();
        assert!(frame.sprites[..platforms].iter().all(|d| d.sprite == SpriteKind::Platform));
        let player_at = frame
            .sprites
            .iter()
            .position(|d| d.sprite == SpriteKind::Player)
            .expect("player drawn");
        let cloud_at = frame
            .sprites
            .iter()
            .position(|d| d.sprite == SpriteKind::Cloud)
            .expect("cloud drawn");
        assert!(cloud_at > player_at);
        assert!(!frame.sprites.iter().any(|d| d.sprite == SpriteKind::Boss));
    }

    #[test]
    fn test_boss_fight_draws_boss_not_clouds() {
        let mut state = playing();
        state.enter_prelude();
        state.enter_boss_fight();
        let frame = build_frame(&state);
        assert!(frame.sprites.iter().any(|d| d.sprite == SpriteKind::Boss));
        assert!(!frame.sprites.iter().any(|d| d.sprite == SpriteKind::Cloud));
    }

    #[test]
    fn test_invincible_player_flickers() {
        let mut state = playing();
        state.player.invincible = true;
        state.player.powerup_timer = 0.25;
        let player = |frame: &FrameSnapshot| {
            frame
                .sprites
                .iter()
                .find(|d| d.sprite == SpriteKind::Player)
                .map(|d| d.visible)
        };
        assert_eq!(player(&build_frame(&state)), Some(false));

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(player(&build_frame_with(&state, &calm)), Some(true));
    }

    #[test]
    fn test_sky_progress_clamps() {
        let mut state = playing();
        assert_eq!(build_frame(&state).background, [0.0, 139.0 / 255.0, 139.0 / 255.0, 1.0]);
        state.elapsed = 500.0;
        let frame = build_frame(&state);
        assert_eq!(frame.sky_progress, 1.0);
        assert_eq!(frame.background, [173.0 / 255.0, 1.0, 47.0 / 255.0, 1.0]);
    }

    #[test]
    fn test_warning_banner_blinks() {
        let mut state = playing();
        state.enter_prelude();
        state.prelude_timer = 0.2;
        assert!(build_frame(&state).warning_banner);
        state.prelude_timer = 0.7;
        assert!(!build_frame(&state).warning_banner);
    }
}
