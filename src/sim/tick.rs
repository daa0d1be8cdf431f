//! Per-frame simulation step
//!
//! Phase dispatch, then motion, then interaction resolution, then phase
//! transitions. Positions move by their per-tick velocity once per call;
//! timers advance by the frame's elapsed `dt`.

use super::collision::resolve_interactions;
use super::state::{EncounterPhase, GameState};

/// Level-triggered input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Swing the net
    pub attack: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        EncounterPhase::MainMenu
        | EncounterPhase::HowToPlay
        | EncounterPhase::GameOver
        | EncounterPhase::Win => return,
        EncounterPhase::Playing => state.elapsed += dt,
        EncounterPhase::BossPrelude => state.prelude_timer += dt,
        EncounterPhase::BossFight => {}
    }

    state
        .player
        .update(input, dt, &state.platforms, &state.tuning, &mut state.events);

    if state.phase == EncounterPhase::BossFight {
        update_boss(state, dt);
        update_flames(state);
    } else {
        update_spawners(state, dt);
        update_enemies(state, dt);
        for coin in &mut state.coins {
            coin.anim.advance(dt);
        }
    }

    resolve_interactions(state);
    if state.phase.is_terminal() {
        return;
    }

    match state.phase {
        EncounterPhase::Playing if state.elapsed >= state.tuning.prelude_start() => {
            state.enter_prelude();
        }
        EncounterPhase::BossPrelude if state.prelude_timer >= state.tuning.prelude_duration => {
            state.enter_boss_fight();
        }
        _ => {}
    }
}

fn update_spawners(state: &mut GameState, dt: f32) {
    let mut requests = Vec::new();
    for spawner in &mut state.spawners {
        if let Some(request) = spawner.update(dt, state.elapsed, &mut state.rng, &state.tuning) {
            requests.push(request);
        }
    }
    state.spawners.retain(|s| !s.has_left_screen());
    for request in requests {
        state.spawn_enemy(request);
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.center();
    for enemy in &mut state.enemies {
        enemy.update(target, dt, &state.platforms, &state.tuning);
    }
    let tuning = &state.tuning;
    state.enemies.retain(|e| !e.should_despawn(tuning));
}

fn update_boss(state: &mut GameState, dt: f32) {
    let live_flames = state.flames.len();
    let burst = match state.boss.as_mut() {
        Some(boss) => boss.update(dt, live_flames, &mut state.rng, &state.tuning, &mut state.events),
        None => 0,
    };
    state.launch_flames(burst);
}

fn update_flames(state: &mut GameState) {
    for flame in &mut state.flames {
        flame.update(&state.platforms, &state.tuning);
    }
    state.flames.retain(|f| !f.should_despawn());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.reset_session();
        state
    }

    #[test]
    fn test_menu_phases_do_not_simulate() {
        let mut state = GameState::new(1, Tuning::default());
        let before = state.player.center();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player.center(), before);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_first_tick_spawns_an_enemy() {
        let mut state = playing(2);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies.len(), 1);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        );
    }

    #[test]
    fn test_player_lands_on_ground_after_spawn() {
        let mut state = playing(3);
        state.spawners.clear();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.player.body.grounded);
    }

    #[test]
    fn test_prelude_then_boss_fight() {
        let mut state = playing(4);
        state.elapsed = state.tuning.prelude_start() - DT / 2.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, EncounterPhase::BossPrelude);
        assert!(state.spawners.iter().all(|s| s.fleeing));
        assert!(state.coins.is_empty() && state.carrots.is_empty());

        state.player.invincible = true;
        state.prelude_timer = state.tuning.prelude_duration - DT / 2.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, EncounterPhase::BossFight);
        assert!(state.enemies.is_empty() && state.spawners.is_empty());
        let boss = state.boss.as_ref().expect("boss spawned");
        assert_eq!(boss.hits_taken, 0);
    }

    #[test]
    fn test_elapsed_only_runs_while_playing() {
        let mut state = playing(5);
        state.spawners.clear();
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.elapsed, 0.5);
        state.enter_prelude();
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.elapsed, 0.5);
        assert_eq!(state.prelude_timer, 0.5);
    }
}
