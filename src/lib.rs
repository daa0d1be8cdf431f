//! Bunny Brave - simulation core for a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, AI, collisions, encounter phases)
//! - `render`: Draw descriptors handed to an external renderer
//! - `audio`: Cue mapping and the fallible audio sink boundary
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (mute, volumes)

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Fixed screen and sprite geometry
///
/// Collision boxes are derived from these extents, so they are not tunable.
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions (y grows downward)
    pub const SCREEN_WIDTH: f32 = 1270.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Nominal frame time used by the headless driver
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;

    /// Sprite extents
    pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 95.0);
    pub const NET_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const PLATFORM_SIZE: Vec2 = Vec2::new(190.0, 47.0);
    pub const GROUND_ENEMY_SIZE: Vec2 = Vec2::new(60.0, 80.0);
    pub const FLYING_ENEMY_SIZE: Vec2 = Vec2::new(61.0, 70.0);
    pub const CLOUD_SIZE: Vec2 = Vec2::new(128.0, 70.0);
    pub const BOSS_SIZE: Vec2 = Vec2::new(140.0, 140.0);
    pub const FLAME_SIZE: Vec2 = Vec2::new(24.0, 36.0);
    pub const COIN_SIZE: Vec2 = Vec2::new(42.0, 42.0);
    pub const CARROT_SIZE: Vec2 = Vec2::new(28.0, 40.0);

    /// Player spawn point (bottom-center anchor)
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(150.0, 0.0);
    /// Cloud spawner start (top-center anchor)
    pub const CLOUD_SPAWN: Vec2 = Vec2::new(600.0, 30.0);
    /// Boss start (top-center anchor, above the screen)
    pub const BOSS_SPAWN_TOP: f32 = -100.0;

    /// Ground strip top edge
    pub const GROUND_TOP: f32 = SCREEN_HEIGHT - 20.0;
    /// Floating platforms (top-center anchors)
    pub const FLOATING_PLATFORMS: [(f32, f32); 7] = [
        (10.0, 520.0),
        (200.0, 220.0),
        (400.0, 420.0),
        (600.0, 220.0),
        (800.0, 520.0),
        (1000.0, 220.0),
        (1200.0, 420.0),
    ];
    /// Collectibles float this far above their platform
    pub const COLLECTIBLE_LIFT: f32 = 20.0;
}

/// Wrap a horizontal coordinate around the screen edges.
///
/// `x >= width` wraps to 0 and `x < 0` wraps to `width`.
#[inline]
pub fn wrap_horizontal(x: f32, width: f32) -> f32 {
    if x >= width {
        0.0
    } else if x < 0.0 {
        width
    } else {
        x
    }
}

/// Unit step toward `target` on one axis (0 when aligned)
#[inline]
pub fn axis_sign_toward(from: f32, target: f32) -> f32 {
    if target > from {
        1.0
    } else if target < from {
        -1.0
    } else {
        0.0
    }
}

/// Blink phase used for flicker effects: visible when `floor(timer * rate)` is even
#[inline]
pub fn blink_visible(timer: f32, rate: f32) -> bool {
    ((timer * rate).floor() as i64).rem_euclid(2) == 0
}

/// Point on the strike arc for a given sweep angle
#[inline]
pub fn arc_point(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    Vec2::new(
        center.x + radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_horizontal() {
        assert_eq!(wrap_horizontal(1270.0, 1270.0), 0.0);
        assert_eq!(wrap_horizontal(-0.5, 1270.0), 1270.0);
        assert_eq!(wrap_horizontal(600.0, 1270.0), 600.0);
    }

    #[test]
    fn test_blink_visible() {
        assert!(blink_visible(0.0, 5.0));
        assert!(!blink_visible(0.25, 5.0));
        assert!(blink_visible(0.45, 5.0));
    }

    #[test]
    fn test_arc_point_is_screen_up() {
        let p = arc_point(Vec2::new(100.0, 100.0), 10.0, std::f32::consts::FRAC_PI_2);
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!((p.y - 90.0).abs() < 1e-4);
    }
}
