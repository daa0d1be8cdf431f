//! Coins and carrots scattered over the floating platforms

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::{AnimClip, Animator};
use super::geom::Aabb;
use super::physics::Platform;
use crate::consts::*;
use crate::tuning::Tuning;

/// Coin value tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinTier {
    Bronze,
    Silver,
    Gold,
}

impl CoinTier {
    pub fn points(self) -> u64 {
        match self {
            CoinTier::Bronze => 5,
            CoinTier::Silver => 10,
            CoinTier::Gold => 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub tier: CoinTier,
    pub rect: Aabb,
    pub anim: Animator,
}

impl Coin {
    pub fn new(id: u32, tier: CoinTier, x: f32, bottom: f32) -> Self {
        Self {
            id,
            tier,
            rect: Aabb::from_midbottom(x, bottom, COIN_SIZE),
            anim: Animator::new(AnimClip::Coin),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrot {
    pub id: u32,
    pub rect: Aabb,
}

impl Carrot {
    pub fn new(id: u32, x: f32, bottom: f32) -> Self {
        Self {
            id,
            rect: Aabb::from_midbottom(x, bottom, CARROT_SIZE),
        }
    }
}

/// Everything placed by one scatter pass
#[derive(Debug, Default)]
pub struct Scatter {
    pub coins: Vec<Coin>,
    pub carrots: Vec<Carrot>,
}

/// Roll a collectible above every floating platform.
///
/// Ground tiles are skipped. `next_id` hands out entity ids.
pub fn scatter(
    platforms: &[Platform],
    rng: &mut Pcg32,
    tuning: &Tuning,
    mut next_id: impl FnMut() -> u32,
) -> Scatter {
    let mut out = Scatter::default();
    for platform in platforms.iter().filter(|p| p.rect.top() < SCREEN_HEIGHT - 50.0) {
        if rng.random::<f32>() >= tuning.collectible_chance {
            continue;
        }
        let x = platform.rect.center.x;
        let bottom = platform.rect.top() - COLLECTIBLE_LIFT;
        if rng.random::<f32>() < tuning.carrot_chance {
            out.carrots.push(Carrot::new(next_id(), x, bottom));
        } else {
            let roll = rng.random::<f32>();
            let tier = if roll < tuning.bronze_chance {
                CoinTier::Bronze
            } else if roll < tuning.bronze_chance + tuning.silver_chance {
                CoinTier::Silver
            } else {
                CoinTier::Gold
            };
            out.coins.push(Coin::new(next_id(), tier, x, bottom));
        }
    }
    out
}
