//! Interaction resolution after motion
//!
//! Runs once per tick in a fixed order:
//! 1. collectibles vs player
//! 2. enemies vs player
//! 3. net vs enemies
//! 4. net vs boss
//! 5. flames vs player
//! 6. boss vs player
//!
//! Each step deals at most one hit to the player. Removal goes through
//! `retain` or a found index, never through the container being scanned.
//! Resolution stops as soon as the session reaches a terminal phase.

use super::boss::BossHitOutcome;
use super::state::{GameEvent, GameState};

/// Resolve every interaction for this tick
pub fn resolve_interactions(state: &mut GameState) {
    collect_pickups(state);

    enemies_hit_player(state);
    if state.phase.is_terminal() {
        return;
    }

    net_hits_enemies(state);

    net_hits_boss(state);
    if state.phase.is_terminal() {
        return;
    }

    flames_hit_player(state);
    if state.phase.is_terminal() {
        return;
    }

    boss_hits_player(state);
}

fn collect_pickups(state: &mut GameState) {
    let player_rect = *state.player.rect();

    let mut points = 0;
    let events = &mut state.events;
    state.coins.retain(|coin| {
        if !coin.rect.overlaps(&player_rect) {
            return true;
        }
        points += coin.tier.points();
        events.push(GameEvent::CoinCollected {
            tier: coin.tier,
            points: coin.tier.points(),
        });
        false
    });
    state.player.score += points;

    let eaten = state
        .carrots
        .iter()
        .filter(|carrot| carrot.rect.overlaps(&player_rect))
        .count();
    if eaten == 0 {
        return;
    }
    state.carrots.retain(|carrot| !carrot.rect.overlaps(&player_rect));
    for _ in 0..eaten {
        let powered = state.player.collect_carrot(&state.tuning);
        state.events.push(GameEvent::CarrotEaten {
            collected: state.player.collected_carrots,
        });
        if powered {
            log::info!("Powerup active for {:.1}s", state.tuning.powerup_duration);
            state.events.push(GameEvent::PowerUpActivated);
        }
    }
}

fn enemies_hit_player(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let player_rect = *state.player.rect();
    if state.enemies.iter().any(|e| e.rect().overlaps(&player_rect)) {
        state.damage_player();
    }
}

fn net_hits_enemies(state: &mut GameState) {
    let Some(net) = state.player.strike_hitbox() else {
        return;
    };
    let mut defeated = Vec::new();
    state.enemies.retain(|enemy| {
        if enemy.rect().overlaps(&net) {
            defeated.push(enemy.id);
            false
        } else {
            true
        }
    });
    for id in defeated {
        state.player.score += state.tuning.enemy_defeat_score;
        state.events.push(GameEvent::NetImpact);
        state.events.push(GameEvent::EnemyDefeated { id });
    }
}

fn net_hits_boss(state: &mut GameState) {
    let Some(net) = state.player.strike_hitbox() else {
        return;
    };
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if !boss.hitbox(&state.tuning).overlaps(&net) {
        return;
    }
    match boss.take_damage(&mut state.rng, &state.tuning) {
        BossHitOutcome::Ignored => {}
        BossHitOutcome::Hurt { hits_taken } => {
            log::debug!("Boss hit {}/{}", hits_taken, boss.max_hp);
            state.events.push(GameEvent::NetImpact);
            state.events.push(GameEvent::BossHit { hits_taken });
        }
        BossHitOutcome::Defeated => {
            let hits_taken = boss.hits_taken;
            state.events.push(GameEvent::NetImpact);
            state.events.push(GameEvent::BossHit { hits_taken });
            log::info!("Boss defeated after {} hits", hits_taken);
            state.enter_win();
        }
    }
}

fn flames_hit_player(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let player_rect = *state.player.rect();
    let hit = state.flames.iter().position(|f| f.rect.overlaps(&player_rect));
    if let Some(index) = hit {
        state.flames.remove(index);
        state.damage_player();
    }
}

fn boss_hits_player(state: &mut GameState) {
    if state.player.invincible {
        return;
    }
    let player_rect = *state.player.rect();
    let touching = state
        .boss
        .as_ref()
        .is_some_and(|boss| boss.hitbox(&state.tuning).overlaps(&player_rect));
    if touching {
        state.damage_player();
    }
}
