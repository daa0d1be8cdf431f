//! Bunny Brave - headless demo
//!
//! Drives one session end to end with a scripted autopilot and logs what
//! happens. Usage: `bunny-brave [tuning.json] [seed]`

use bunny_brave::audio::{AudioError, AudioManager, AudioSink, MusicTrack, SoundEffect};
use bunny_brave::consts::NOMINAL_DT;
use bunny_brave::sim::{EncounterPhase, GameState, MenuKey, TickInput, tick};
use bunny_brave::{Settings, Tuning};

/// Simulated seconds before the demo gives up
#[cfg(not(target_arch = "wasm32"))]
const DEMO_TIME_LIMIT: f32 = 240.0;

/// Sink that writes cues to the log instead of a device
#[cfg(not(target_arch = "wasm32"))]
struct LogSink;

#[cfg(not(target_arch = "wasm32"))]
impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
        Ok(())
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError> {
        log::info!("music {:?} @ {:.2}", track, volume);
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        log::info!("music stopped");
        Ok(())
    }
}

/// Chase the nearest threat and swing when it is close
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState, frame: u64) -> TickInput {
    let me = state.player.center();
    let target = match &state.boss {
        Some(boss) => Some(boss.rect.center),
        None => state
            .enemies
            .iter()
            .map(|e| e.rect().center)
            .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me))),
    };

    let mut input = TickInput::default();
    if let Some(target) = target {
        let dx = target.x - me.x;
        input.right = dx > 30.0;
        input.left = dx < -30.0;
        input.attack = dx.abs() < 90.0 && (target.y - me.y).abs() < 120.0;
        input.jump = target.y < me.y - 60.0 && frame % 45 == 0;
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bunny Brave (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let settings = Settings::default();
    let mut audio = AudioManager::with_settings(LogSink, &settings);
    let mut state = GameState::new(seed, tuning);
    audio.sync_music(state.phase);

    // Start from the menu like a player would
    state.handle_key(MenuKey::Confirm);
    audio.dispatch(&state.drain_events());

    let mut frame = 0u64;
    let mut simulated = 0.0;
    while !state.phase.is_terminal() && simulated < DEMO_TIME_LIMIT {
        let input = autopilot(&state, frame);
        tick(&mut state, &input, NOMINAL_DT);
        audio.dispatch(&state.drain_events());
        frame += 1;
        simulated += NOMINAL_DT;
    }

    let hud = state.hud();
    let outcome = match state.phase {
        EncounterPhase::Win => "won",
        EncounterPhase::GameOver => "lost",
        _ => "timed out",
    };
    println!("Run {outcome} after {frame} frames ({simulated:.1}s)");
    println!(
        "  lives={} score={} elapsed={:.1}s powerup={:.0}%",
        hud.lives,
        hud.score,
        hud.elapsed,
        hud.powerup_progress * 100.0
    );
    if let Some((hits, max)) = hud.boss_hits {
        println!("  boss hits {hits}/{max}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on wasm; a browser frontend owns the loop
}
