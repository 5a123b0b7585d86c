//! Session data model: player, enemy, game state and the actions that drive it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::StartingStats;

const TURN_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub gold: i32,
    pub xp: i32,
    pub level: u32,
}

impl Player {
    pub fn new(start: &StartingStats) -> Self {
        Player {
            hp: start.hp.min(start.max_hp).max(0),
            max_hp: start.max_hp,
            attack: start.attack,
            gold: start.gold,
            xp: start.xp,
            level: start.level,
        }
    }

    /// XP needed to reach the next level.
    pub fn xp_to_next(&self) -> i32 {
        self.level as i32 * 50
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Restore up to `amount` hp without exceeding max_hp. Returns the hp actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Apply damage, never dropping below 0. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub xp_reward: i32,
}

impl Enemy {
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Remaining health as a 0.0..=1.0 ratio for bar-style displays.
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.max_hp as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Explore,
    Fight,
    Shop,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameState::Explore => "explore",
            GameState::Fight => "fight",
            GameState::Shop => "shop",
            GameState::GameOver => "game over",
        };
        f.write_str(s)
    }
}

/// Every user-facing button, mapped 1:1 onto a state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Explore,
    Fight,
    Flee,
    Rest,
    BuyItemA,
    BuyItemB,
    GotoShop,
    GotoExplore,
    Reset,
}

impl Action {
    /// Parse terse console input. Case-insensitive; accepts compact and spaced forms
    /// ("BA", "BUY A", "buy blade").
    pub fn parse(raw: &str) -> Option<Action> {
        let up = raw.trim().to_uppercase();
        let merged: String = up.split_whitespace().collect::<Vec<_>>().join("");
        let action = match merged.as_str() {
            "X" | "EXPLORE" | "GO" => Action::Explore,
            "A" | "F" | "FIGHT" | "ATTACK" => Action::Fight,
            "RUN" | "FLEE" => Action::Flee,
            "R" | "REST" => Action::Rest,
            "BA" | "BUYA" | "BLADE" | "BUYBLADE" => Action::BuyItemA,
            "BB" | "BUYB" | "TONIC" | "BUYTONIC" => Action::BuyItemB,
            "S" | "SHOP" => Action::GotoShop,
            "B" | "BACK" | "LEAVE" => Action::GotoExplore,
            "RESET" | "NEW" | "RESTART" => Action::Reset,
            _ => return None,
        };
        Some(action)
    }

    /// Short alias shown in the options line.
    pub fn alias(self) -> &'static str {
        match self {
            Action::Explore => "X",
            Action::Fight => "A",
            Action::Flee => "RUN",
            Action::Rest => "R",
            Action::BuyItemA => "BA",
            Action::BuyItemB => "BB",
            Action::GotoShop => "S",
            Action::GotoExplore => "B",
            Action::Reset => "RESET",
        }
    }

    /// Actions with a transition out of `state`. `Reset` is always accepted.
    pub fn available_in(state: GameState) -> &'static [Action] {
        match state {
            GameState::Explore => &[
                Action::Explore,
                Action::Rest,
                Action::GotoShop,
                Action::Reset,
            ],
            GameState::Fight => &[Action::Fight, Action::Flee, Action::Reset],
            GameState::Shop => &[
                Action::BuyItemA,
                Action::BuyItemB,
                Action::GotoExplore,
                Action::Reset,
            ],
            GameState::GameOver => &[Action::Reset],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Explore => "explore",
            Action::Fight => "fight",
            Action::Flee => "flee",
            Action::Rest => "rest",
            Action::BuyItemA => "buy item A",
            Action::BuyItemB => "buy item B",
            Action::GotoShop => "go to shop",
            Action::GotoExplore => "go back to exploring",
            Action::Reset => "reset",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub turns: u32,
    pub monsters_slain: u32,
    pub gold_earned: i32,
    pub times_fled: u32,
}

/// One player's continuous play state. Everything the game needs lives here;
/// handlers receive it by `&mut` and there is no other mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub player: Player,
    pub state: GameState,
    /// Present only while `state == Fight`.
    #[serde(default)]
    pub enemy: Option<Enemy>,
    pub story: String,
    pub seed: u64,
    pub turn: u32,
    #[serde(default)]
    pub stats: SessionStats,
}

pub const OPENING_STORY: &str =
    "You stand at the mouth of a dark dungeon. Torchlight flickers on damp stone.";

impl Session {
    pub fn new(start: &StartingStats, seed: u64) -> Self {
        Session {
            player: Player::new(start),
            state: GameState::Explore,
            enemy: None,
            story: OPENING_STORY.to_string(),
            seed,
            turn: 0,
            stats: SessionStats::default(),
        }
    }

    /// Destroy and recreate all state from the starting stats.
    pub fn reset(&mut self, start: &StartingStats, seed: u64) {
        *self = Session::new(start, seed);
    }

    /// RNG for the current turn. Derived from the seed so replays are reproducible.
    /// The turn is spread by a golden-ratio multiply so seed `s + 1` does not replay
    /// seed `s` one turn later.
    pub fn turn_rng(&self) -> StdRng {
        let mix = (self.turn as u64).wrapping_mul(TURN_MIX);
        StdRng::seed_from_u64(self.seed ^ mix)
    }

    /// Replace the seed; subsequent turns draw from the new stream.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }
}
