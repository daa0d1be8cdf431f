//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep: positions move per tick, timers advance by `dt`
//! - Seeded RNG owned by the session
//! - No rendering, audio or input-device dependencies

pub mod anim;
pub mod boss;
pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod flame;
pub mod geom;
pub mod physics;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use anim::{AnimClip, Animator};
pub use boss::{Boss, BossHitOutcome};
pub use collectible::{Carrot, Coin, CoinTier};
pub use collision::resolve_interactions;
pub use enemy::{Enemy, EnemyKind};
pub use flame::Flame;
pub use geom::Aabb;
pub use physics::{Body, Platform, build_platforms, integrate_vertical};
pub use player::{DamageOutcome, Facing, Player};
pub use spawner::{CloudSpawner, SpawnKind, SpawnRequest, spawn_cooldown_at};
pub use state::{
    EncounterPhase, GameEvent, GameState, HudTelemetry, MenuCommand, MenuEntry, MenuKey,
};
pub use tick::{TickInput, tick};
