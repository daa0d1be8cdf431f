//! Data-driven game balance
//!
//! Every speed, timer and threshold the simulation reads lives here so a
//! JSON file can rebalance a build without touching code. Velocities are in
//! pixels per tick, timers in seconds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("tuning file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub gravity: f32,
    /// Entities deeper than `SCREEN_HEIGHT + despawn_margin` are removed
    pub despawn_margin: f32,

    // === Player ===
    pub starting_lives: u32,
    pub player_move_speed: f32,
    pub jump_strength: f32,
    pub attack_cooldown: f32,
    pub attack_duration: f32,
    /// Net sweep radius as a fraction of player height
    pub net_radius_factor: f32,
    pub footstep_interval: f32,
    pub powerup_carrots_required: u32,
    pub powerup_duration: f32,
    pub enemy_defeat_score: u64,

    // === Enemies ===
    pub enemy_follow_speed: f32,
    pub flyer_follow_speed: f32,
    pub flyer_ground_time: f32,
    pub flee_speed: f32,

    // === Spawner ===
    pub cloud_speed: f32,
    pub spawn_cooldown_min: f32,
    pub spawn_cooldown_max: f32,
    /// Seconds of play over which spawn cadence doubles
    pub difficulty_ramp: f32,

    // === Encounter ===
    pub boss_fight_threshold: f32,
    pub prelude_duration: f32,

    // === Boss ===
    pub boss_max_hp: u32,
    pub boss_descent_speed: f32,
    pub boss_target_altitude: f32,
    pub boss_attack_interval_min: f32,
    pub boss_attack_interval_max: f32,
    pub boss_max_flames: usize,
    pub boss_invincibility_duration: f32,
    pub boss_reposition_speed: f32,
    pub boss_snap_distance: f32,
    pub boss_hitbox_inset: f32,

    // === Flame ===
    pub flame_speed_x: f32,
    pub flame_launch_vy_min: f32,
    pub flame_launch_vy_max: f32,
    pub flame_bounce_damping: f32,
    pub flame_horizontal_damping: f32,
    pub flame_bounces_min: u32,
    pub flame_bounces_max: u32,

    // === Collectibles ===
    /// Chance that a floating platform carries a collectible
    pub collectible_chance: f32,
    /// Chance that a placed collectible is a carrot rather than a coin
    pub carrot_chance: f32,
    pub bronze_chance: f32,
    pub silver_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            despawn_margin: 50.0,

            starting_lives: 3,
            player_move_speed: 5.0,
            jump_strength: -18.0,
            attack_cooldown: 1.5,
            attack_duration: 0.45, // 9 net frames at 0.05s
            net_radius_factor: 0.55,
            footstep_interval: 0.3,
            powerup_carrots_required: 8,
            powerup_duration: 4.0,
            enemy_defeat_score: 50,

            enemy_follow_speed: 3.0,
            flyer_follow_speed: 3.0,
            flyer_ground_time: 4.0,
            flee_speed: 8.0,

            cloud_speed: 3.0,
            spawn_cooldown_min: 3.0,
            spawn_cooldown_max: 8.0,
            difficulty_ramp: 90.0,

            boss_fight_threshold: 120.0,
            prelude_duration: 6.0,

            boss_max_hp: 5,
            boss_descent_speed: 2.0,
            boss_target_altitude: 50.0,
            boss_attack_interval_min: 0.5,
            boss_attack_interval_max: 1.5,
            boss_max_flames: 3,
            boss_invincibility_duration: 4.0,
            boss_reposition_speed: 2.0,
            boss_snap_distance: 5.0,
            boss_hitbox_inset: 20.0,

            flame_speed_x: 3.0,
            flame_launch_vy_min: -9.0,
            flame_launch_vy_max: -6.0,
            flame_bounce_damping: 0.7,
            flame_horizontal_damping: 0.9,
            flame_bounces_min: 7,
            flame_bounces_max: 8,

            collectible_chance: 0.5,
            carrot_chance: 0.6,
            bronze_chance: 0.5,
            silver_chance: 0.3,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{} ({}), using default tuning", e, path.display());
                Self::default()
            }
        }
    }

    /// Seconds of play before the prelude starts
    pub fn prelude_start(&self) -> f32 {
        self.boss_fight_threshold - self.prelude_duration
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("attack_duration", self.attack_duration),
            ("powerup_duration", self.powerup_duration),
            ("difficulty_ramp", self.difficulty_ramp),
            ("prelude_duration", self.prelude_duration),
            ("boss_invincibility_duration", self.boss_invincibility_duration),
            ("boss_descent_speed", self.boss_descent_speed),
            ("boss_reposition_speed", self.boss_reposition_speed),
            ("boss_snap_distance", self.boss_snap_distance),
            ("spawn_cooldown_min", self.spawn_cooldown_min),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let ranges = [
            ("spawn_cooldown", self.spawn_cooldown_min, self.spawn_cooldown_max),
            ("boss_attack_interval", self.boss_attack_interval_min, self.boss_attack_interval_max),
            ("flame_launch_vy", self.flame_launch_vy_min, self.flame_launch_vy_max),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(TuningError::Invalid(format!("{name}_min {min} exceeds {name}_max {max}")));
            }
        }
        if self.flame_bounces_min > self.flame_bounces_max {
            return Err(TuningError::Invalid(format!(
                "flame_bounces_min {} exceeds flame_bounces_max {}",
                self.flame_bounces_min, self.flame_bounces_max
            )));
        }

        if self.boss_fight_threshold < self.prelude_duration {
            return Err(TuningError::Invalid(
                "boss_fight_threshold must not be shorter than prelude_duration".into(),
            ));
        }
        if self.powerup_carrots_required == 0 {
            return Err(TuningError::Invalid("powerup_carrots_required must be at least 1".into()));
        }
        if self.boss_max_hp == 0 || self.starting_lives == 0 {
            return Err(TuningError::Invalid("boss_max_hp and starting_lives must be at least 1".into()));
        }

        let chances = [
            ("collectible_chance", self.collectible_chance),
            ("carrot_chance", self.carrot_chance),
            ("bronze_chance", self.bronze_chance),
            ("silver_chance", self.silver_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(TuningError::Invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if self.bronze_chance + self.silver_chance > 1.0 {
            return Err(TuningError::Invalid("bronze_chance + silver_chance exceeds 1".into()));
        }

        Ok(())
    }
}
