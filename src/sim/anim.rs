//! Animation clips
//!
//! Each archetype plays from a fixed table of clips. The simulation only
//! tracks which clip and frame are current; turning that into pixels is the
//! renderer's job.

use serde::{Deserialize, Serialize};

/// Every animation the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimClip {
    PlayerStand,
    PlayerWalk,
    PlayerJump,
    PlayerAttack,
    /// Net sweep, indexed by attack progress rather than time
    NetSweep,
    GroundEnemyWalk,
    FlyerStand,
    FlyerFly,
    Cloud,
    Boss,
    Flame,
    Coin,
    Carrot,
    Platform,
}

impl AnimClip {
    pub fn frame_count(self) -> usize {
        match self {
            AnimClip::PlayerStand => 2,
            AnimClip::PlayerWalk => 2,
            AnimClip::PlayerJump => 1,
            AnimClip::PlayerAttack => 1,
            AnimClip::NetSweep => 9,
            AnimClip::GroundEnemyWalk => 2,
            AnimClip::FlyerStand => 2,
            AnimClip::FlyerFly => 1,
            AnimClip::Boss => 2,
            AnimClip::Coin => 4,
            AnimClip::Cloud | AnimClip::Flame | AnimClip::Carrot | AnimClip::Platform => 1,
        }
    }

    /// Seconds per frame (0 for clips that never advance on their own)
    pub fn frame_duration(self) -> f32 {
        match self {
            AnimClip::PlayerStand => 0.4,
            AnimClip::PlayerWalk => 0.14,
            AnimClip::NetSweep => 0.05,
            AnimClip::GroundEnemyWalk => 0.2,
            AnimClip::FlyerStand => 0.4,
            AnimClip::FlyerFly => 0.1,
            AnimClip::Boss => 0.3,
            AnimClip::Coin => 0.3,
            AnimClip::PlayerJump
            | AnimClip::PlayerAttack
            | AnimClip::Cloud
            | AnimClip::Flame
            | AnimClip::Carrot
            | AnimClip::Platform => 0.0,
        }
    }
}

/// Current clip, frame and time accumulated toward the next frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    pub clip: AnimClip,
    pub frame: usize,
    timer: f32,
}

impl Animator {
    pub fn new(clip: AnimClip) -> Self {
        Self {
            clip,
            frame: 0,
            timer: 0.0,
        }
    }

    /// Switch clips, restarting from frame 0 only when the clip changes
    pub fn play(&mut self, clip: AnimClip) {
        if self.clip != clip {
            self.clip = clip;
            self.frame = 0;
            self.timer = 0.0;
        }
    }

    /// Accumulate time and step one frame once the clip's duration is reached
    pub fn advance(&mut self, dt: f32) {
        let duration = self.clip.frame_duration();
        if duration <= 0.0 {
            return;
        }
        self.timer += dt;
        if self.timer >= duration {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % self.clip.frame_count();
        }
    }

    /// Jump to a specific frame (clamped to the clip)
    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame.min(self.clip.frame_count() - 1);
    }
}
