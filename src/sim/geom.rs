//! Axis-aligned bounding boxes
//!
//! A box is stored by center and full size. Entities are placed through
//! anchor constructors (`midtop`, `midbottom`) that match how their sprites
//! are authored; collision math depends on that placement being exact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Box whose top edge midpoint sits at `(x, top)`
    pub fn from_midtop(x: f32, top: f32, size: Vec2) -> Self {
        Self {
            center: Vec2::new(x, top + size.y / 2.0),
            size,
        }
    }

    /// Box whose bottom edge midpoint sits at `(x, bottom)`
    pub fn from_midbottom(x: f32, bottom: f32, size: Vec2) -> Self {
        Self {
            center: Vec2::new(x, bottom - size.y / 2.0),
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Bottom edge midpoint
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.center.x, self.bottom())
    }

    /// Move vertically so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.center.y = y - self.size.y / 2.0;
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlap that also counts this box's bottom edge resting on `other`'s top edge
    pub fn overlaps_or_rests_on(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() >= other.top()
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Aabb {
        Aabb {
            center: self.center,
            size: (self.size - Vec2::splat(2.0 * margin)).max(Vec2::ZERO),
        }
    }

    /// Entirely left of `x = 0` or right of `x = width`
    pub fn is_off_screen_horizontally(&self, width: f32) -> bool {
        self.right() < 0.0 || self.left() > width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        let size = Vec2::new(20.0, 10.0);
        let a = Aabb::from_midtop(100.0, 50.0, size);
        assert_eq!(a.top(), 50.0);
        assert_eq!(a.bottom(), 60.0);
        assert_eq!(a.left(), 90.0);

        let b = Aabb::from_midbottom(100.0, 50.0, size);
        assert_eq!(b.bottom(), 50.0);
        assert_eq!(b.midbottom(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let floor = Aabb::from_midtop(0.0, 100.0, Vec2::new(200.0, 20.0));
        let body = Aabb::from_midbottom(0.0, 100.0, Vec2::new(10.0, 10.0));
        assert!(!body.overlaps(&floor));
        assert!(body.overlaps_or_rests_on(&floor));
    }

    #[test]
    fn test_inset() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::new(140.0, 140.0));
        let hit = a.inset(20.0);
        assert_eq!(hit.size, Vec2::new(100.0, 100.0));
        assert_eq!(hit.left(), -50.0);
    }

    #[test]
    fn test_off_screen() {
        let a = Aabb::from_center(Vec2::new(-31.0, 0.0), Vec2::new(60.0, 60.0));
        assert!(a.is_off_screen_horizontally(1270.0));
        let b = Aabb::from_center(Vec2::new(-29.0, 0.0), Vec2::new(60.0, 60.0));
        assert!(!b.is_off_screen_horizontally(1270.0));
    }
}
