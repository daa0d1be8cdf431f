//! Gravity and platform landing
//!
//! Any archetype that stands on platforms owns a [`Body`] and calls
//! [`integrate_vertical`] once per tick. Horizontal platform collision is not
//! modeled: platforms are one-way floors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;

/// A static floor segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Aabb,
}

impl Platform {
    pub fn from_midtop(x: f32, top: f32) -> Self {
        Self {
            rect: Aabb::from_midtop(x, top, PLATFORM_SIZE),
        }
    }
}

/// Build the level: a ground strip of tiles plus the floating platforms.
///
/// Ground tiles come first so overlapping landings resolve to the ground.
pub fn build_platforms() -> Vec<Platform> {
    let tile_w = PLATFORM_SIZE.x;
    let ground_tiles = (SCREEN_WIDTH / tile_w) as usize + 2;
    let mut platforms: Vec<Platform> = (0..ground_tiles)
        .map(|i| Platform::from_midtop(i as f32 * tile_w + tile_w / 2.0, GROUND_TOP))
        .collect();
    platforms.extend(
        FLOATING_PLATFORMS
            .iter()
            .map(|&(x, top)| Platform::from_midtop(x, top)),
    );
    platforms
}

/// Position, velocity and ground contact for a platform-bound entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Aabb,
    pub vel: Vec2,
    pub grounded: bool,
}

impl Body {
    pub fn new(rect: Aabb) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }
}

/// Tunneling guard: the first platform `rect` may land on, given where its
/// center was before this step.
///
/// A platform qualifies only if `rect` touches it and the previous
/// center-plus-half-height was at or above the platform's
/// center-plus-half-height. Iteration order breaks ties.
pub fn find_landing<'a>(
    rect: &Aabb,
    prev_center_y: f32,
    platforms: &'a [Platform],
) -> Option<&'a Platform> {
    let prev_bottom = prev_center_y + rect.size.y / 2.0;
    platforms
        .iter()
        .find(|p| rect.overlaps_or_rests_on(&p.rect) && prev_bottom <= p.rect.bottom())
}

/// Advance a body vertically by one tick.
///
/// Order matters: move by `vel.y`, add gravity unless grounded, clear the
/// grounded flag, then test platforms. A non-rising body that lands snaps
/// its bottom to the platform top, zeroes `vel.y` and becomes grounded.
pub fn integrate_vertical(body: &mut Body, prev_center_y: f32, platforms: &[Platform], gravity: f32) {
    body.rect.center.y += body.vel.y;
    if !body.grounded {
        body.vel.y += gravity;
    }
    body.grounded = false;

    if body.vel.y < 0.0 {
        return;
    }
    if let Some(platform) = find_landing(&body.rect, prev_center_y, platforms) {
        body.rect.set_bottom(platform.rect.top());
        body.vel.y = 0.0;
        body.grounded = true;
    }
}
