//! Session state and encounter phases
//!
//! One `GameState` owns every entity container. Nothing here is global; the
//! frontend holds the session and passes it to `tick` and `render`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::collectible::{Carrot, Coin, CoinTier, scatter};
use super::enemy::Enemy;
use super::flame::Flame;
use super::physics::{Platform, build_platforms};
use super::player::{DamageOutcome, Player};
use super::spawner::{CloudSpawner, SpawnKind, SpawnRequest};
use crate::tuning::Tuning;

/// Top-level encounter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterPhase {
    MainMenu,
    HowToPlay,
    /// Enemies spawn while the play clock runs toward the boss
    Playing,
    /// Enemies and spawners flee; the boss is about to appear
    BossPrelude,
    BossFight,
    GameOver,
    Win,
}

impl EncounterPhase {
    /// Simulation is frozen until the session is reset
    pub fn is_terminal(self) -> bool {
        matches!(self, EncounterPhase::GameOver | EncounterPhase::Win)
    }

    /// Phases where the player is on screen and ticking
    pub fn is_in_play(self) -> bool {
        matches!(
            self,
            EncounterPhase::Playing | EncounterPhase::BossPrelude | EncounterPhase::BossFight
        )
    }
}

/// Something that happened during a tick. Drained by the frontend for audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: EncounterPhase, to: EncounterPhase },
    Footstep,
    Jumped,
    NetSwing,
    CoinCollected { tier: CoinTier, points: u64 },
    CarrotEaten { collected: u32 },
    PowerUpActivated,
    PowerUpExpired,
    PlayerHurt { lives_left: u32 },
    EnemySpawned { id: u32, kind: SpawnKind },
    EnemyDefeated { id: u32 },
    NetImpact,
    BossWarning,
    BossArriving,
    FlameLaunched { id: u32 },
    BossHit { hits_taken: u32 },
    BossDefeated,
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuEntry {
    Start,
    HowToPlay,
    Quit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [MenuEntry::Start, MenuEntry::HowToPlay, MenuEntry::Quit];
}

/// Discrete menu navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Confirm,
    Back,
}

/// Requests the frontend must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Quit,
}

/// Read-only numbers for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudTelemetry {
    pub phase: EncounterPhase,
    pub lives: u32,
    pub score: u64,
    /// Seconds of play this session
    pub elapsed: f32,
    /// Carrot charge toward the next powerup, 0..=1
    pub powerup_progress: f32,
    pub invincibility_remaining: f32,
    /// Present only during the boss fight
    pub boss_hits: Option<(u32, u32)>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: EncounterPhase,
    /// Index into `MenuEntry::ALL`
    pub menu_selection: usize,
    /// Seconds spent in PLAYING and later phases
    pub elapsed: f32,
    /// Seconds spent in BOSS_PRELUDE
    pub prelude_timer: f32,
    pub platforms: Vec<Platform>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub spawners: Vec<CloudSpawner>,
    pub coins: Vec<Coin>,
    pub carrots: Vec<Carrot>,
    pub flames: Vec<Flame>,
    pub boss: Option<Boss>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New process-level state, parked on the main menu.
    ///
    /// Only the platforms exist until a session starts.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.starting_lives),
            tuning,
            phase: EncounterPhase::MainMenu,
            menu_selection: 0,
            elapsed: 0.0,
            prelude_timer: 0.0,
            platforms: build_platforms(),
            enemies: Vec::new(),
            spawners: Vec::new(),
            coins: Vec::new(),
            carrots: Vec::new(),
            flames: Vec::new(),
            boss: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh platforms, player, spawner and collectibles; timers zeroed
    fn rebuild_world(&mut self) {
        self.elapsed = 0.0;
        self.prelude_timer = 0.0;
        self.enemies.clear();
        self.flames.clear();
        self.boss = None;
        self.platforms = build_platforms();
        self.player = Player::new(self.tuning.starting_lives);
        self.spawners = vec![CloudSpawner::new(&mut self.rng, &self.tuning)];

        let mut next_id = self.next_id;
        let placed = scatter(&self.platforms, &mut self.rng, &self.tuning, || {
            let id = next_id;
            next_id += 1;
            id
        });
        self.next_id = next_id;
        self.coins = placed.coins;
        self.carrots = placed.carrots;
    }

    /// Start a new run: reinitialize everything and enter PLAYING
    pub fn reset_session(&mut self) {
        self.rebuild_world();
        self.menu_selection = 0;
        log::info!(
            "Session reset: {} platforms, {} coins, {} carrots",
            self.platforms.len(),
            self.coins.len(),
            self.carrots.len()
        );
        self.set_phase(EncounterPhase::Playing);
    }

    /// Change phase, emitting `PhaseChanged` when it actually changes
    pub fn set_phase(&mut self, to: EncounterPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?} at {:.2}s", from, to, self.elapsed);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Menu ===

    pub fn selected_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.menu_selection % MenuEntry::ALL.len()]
    }

    /// Apply one menu key. Keys that mean nothing in the current phase are ignored.
    pub fn handle_key(&mut self, key: MenuKey) -> Option<MenuCommand> {
        let entries = MenuEntry::ALL.len();
        match (self.phase, key) {
            (EncounterPhase::MainMenu, MenuKey::Up) => {
                self.menu_selection = (self.menu_selection + entries - 1) % entries;
            }
            (EncounterPhase::MainMenu, MenuKey::Down) => {
                self.menu_selection = (self.menu_selection + 1) % entries;
            }
            (EncounterPhase::MainMenu, MenuKey::Confirm) => match self.selected_entry() {
                MenuEntry::Start => self.reset_session(),
                MenuEntry::HowToPlay => self.set_phase(EncounterPhase::HowToPlay),
                MenuEntry::Quit => return Some(MenuCommand::Quit),
            },
            (EncounterPhase::HowToPlay, MenuKey::Back) => self.set_phase(EncounterPhase::MainMenu),
            (EncounterPhase::GameOver | EncounterPhase::Win, MenuKey::Confirm) => {
                self.set_phase(EncounterPhase::MainMenu)
            }
            _ => {}
        }
        None
    }

    // === Entity management ===

    /// Materialize a spawner's request
    pub fn spawn_enemy(&mut self, request: SpawnRequest) {
        let id = self.next_entity_id();
        let enemy = match request.kind {
            SpawnKind::Ground => Enemy::ground(id, request.x, request.top),
            SpawnKind::Flying => Enemy::flying(id, request.x, request.top, self.tuning.flyer_ground_time),
        };
        log::debug!("Spawned {:?} enemy #{} at x={:.0}", request.kind, id, request.x);
        self.events.push(GameEvent::EnemySpawned {
            id,
            kind: request.kind,
        });
        self.enemies.push(enemy);
    }

    /// Launch up to `count` flames from the boss, never exceeding the cap
    pub fn launch_flames(&mut self, count: usize) {
        let Some(origin) = self.boss.as_ref().map(Boss::launch_origin) else {
            return;
        };
        for _ in 0..count {
            if self.flames.len() >= self.tuning.boss_max_flames {
                break;
            }
            let id = self.next_entity_id();
            self.flames.push(Flame::launch(id, origin, &mut self.rng, &self.tuning));
            self.events.push(GameEvent::FlameLaunched { id });
        }
    }

    /// Apply one hit to the player.
    ///
    /// A lost life sends the player back to spawn and clears every enemy
    /// and flame. The last life ends the session.
    pub fn damage_player(&mut self) -> DamageOutcome {
        let outcome = self.player.take_damage();
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::LifeLost { lives_left } => {
                self.enemies.clear();
                self.flames.clear();
                self.events.push(GameEvent::PlayerHurt { lives_left });
                log::info!("Player hit, {} lives left", lives_left);
            }
            DamageOutcome::Died => {
                self.events.push(GameEvent::PlayerHurt { lives_left: 0 });
                self.enter_game_over();
            }
        }
        outcome
    }

    // === Encounter transitions ===

    /// PLAYING -> BOSS_PRELUDE: everything flees, collectibles vanish
    pub fn enter_prelude(&mut self) {
        let flee_speed = self.tuning.flee_speed;
        for enemy in &mut self.enemies {
            enemy.start_fleeing(flee_speed);
        }
        for spawner in &mut self.spawners {
            spawner.start_fleeing(flee_speed);
        }
        self.coins.clear();
        self.carrots.clear();
        self.prelude_timer = 0.0;
        self.events.push(GameEvent::BossWarning);
        self.set_phase(EncounterPhase::BossPrelude);
    }

    /// BOSS_PRELUDE -> BOSS_FIGHT: stragglers are dropped and the boss appears
    pub fn enter_boss_fight(&mut self) {
        self.enemies.clear();
        self.spawners.clear();
        self.flames.clear();
        self.boss = Some(Boss::new(&mut self.rng, &self.tuning));
        self.set_phase(EncounterPhase::BossFight);
    }

    /// BOSS_FIGHT -> WIN
    pub fn enter_win(&mut self) {
        self.clear_session_entities();
        self.events.push(GameEvent::BossDefeated);
        self.set_phase(EncounterPhase::Win);
    }

    /// Any play phase -> GAMEOVER
    pub fn enter_game_over(&mut self) {
        self.clear_session_entities();
        self.set_phase(EncounterPhase::GameOver);
    }

    /// Drop everything a finished session owned except platforms and player
    fn clear_session_entities(&mut self) {
        self.boss = None;
        self.flames.clear();
        self.enemies.clear();
        self.spawners.clear();
        self.coins.clear();
        self.carrots.clear();
    }

    // === Telemetry ===

    pub fn hud(&self) -> HudTelemetry {
        HudTelemetry {
            phase: self.phase,
            lives: self.player.lives,
            score: self.player.score,
            elapsed: self.elapsed,
            powerup_progress: self.player.powerup_progress(&self.tuning),
            invincibility_remaining: self.player.invincibility_remaining(&self.tuning),
            boss_hits: self.boss.as_ref().map(|b| (b.hits_taken, b.max_hp)),
        }
    }
}
