//! Dungeon events and the monster roster.
//!
//! Explore outcomes are drawn from a categorical distribution keyed by [`Encounter`]
//! with explicit weights from [`EncounterWeights`]. Monsters are picked uniformly from
//! the roster and scaled by player level when the difficulty curve is enabled.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Enemy;
use crate::config::EncounterWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    Monster,
    Treasure,
    Trap,
    Rest,
}

pub struct EncounterTable {
    outcomes: [Encounter; 4],
    dist: WeightedIndex<u32>,
}

impl EncounterTable {
    pub fn new(weights: &EncounterWeights) -> Result<Self, WeightedError> {
        let outcomes = [
            Encounter::Monster,
            Encounter::Treasure,
            Encounter::Trap,
            Encounter::Rest,
        ];
        let dist = WeightedIndex::new([
            weights.monster,
            weights.treasure,
            weights.trap,
            weights.rest,
        ])?;
        Ok(EncounterTable { outcomes, dist })
    }

    pub fn roll(&self, rng: &mut StdRng) -> Encounter {
        self.outcomes[self.dist.sample(rng)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterKind {
    Slime,
    Goblin,
    Bandit,
    Skeleton,
    Orc,
}

pub const ROSTER: [MonsterKind; 5] = [
    MonsterKind::Slime,
    MonsterKind::Goblin,
    MonsterKind::Bandit,
    MonsterKind::Skeleton,
    MonsterKind::Orc,
];

impl MonsterKind {
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Slime => "Slime",
            MonsterKind::Goblin => "Goblin",
            MonsterKind::Bandit => "Bandit",
            MonsterKind::Skeleton => "Skeleton",
            MonsterKind::Orc => "Orc",
        }
    }

    /// (hp, damage, xp_reward) before level scaling.
    fn base_stats(self) -> (i32, i32, i32) {
        match self {
            MonsterKind::Slime => (20, 3, 10),
            MonsterKind::Goblin => (30, 5, 20),
            MonsterKind::Bandit => (35, 6, 20),
            MonsterKind::Skeleton => (40, 7, 25),
            MonsterKind::Orc => (50, 10, 35),
        }
    }

    /// Build an enemy. With scaling: hp + level*5, damage + level, xp + level*2.
    pub fn spawn(self, level: u32, scale_with_level: bool) -> Enemy {
        let (mut hp, mut damage, mut xp) = self.base_stats();
        if scale_with_level {
            let lvl = level as i32;
            hp += lvl * 5;
            damage += lvl;
            xp += lvl * 2;
        }
        Enemy {
            name: self.name().to_string(),
            hp,
            max_hp: hp,
            damage,
            xp_reward: xp,
        }
    }
}

pub fn random_monster(rng: &mut StdRng) -> MonsterKind {
    ROSTER[rng.gen_range(0..ROSTER.len())]
}
