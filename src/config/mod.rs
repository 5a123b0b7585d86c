//! # Configuration Management Module
//!
//! Loads and validates the TOML configuration that tunes the dungeon: starting stats,
//! encounter weights, combat odds, shop prices, where sessions are saved and how
//! logging is set up.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - Balance knobs for the state machine
//! - [`StartingStats`] - The values a fresh or reset session starts from
//! - [`EncounterWeights`] - Relative weights of the explore outcomes
//! - [`ShopConfig`] - Prices and bonuses for the two shop items
//! - [`StorageConfig`] - Save file location
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dungeondoor::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Flee chance: {}", config.game.flee_chance);
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! flee_chance = 0.7
//! scale_with_level = true
//!
//! [game.start]
//! hp = 100
//! max_hp = 100
//! attack = 15
//! gold = 50
//!
//! [game.encounters]
//! monster = 50
//! treasure = 25
//! trap = 15
//! rest = 10
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "warn"
//! file = "dungeondoor.log"
//! ```
//!
//! Every section and field is optional; missing values fall back to the defaults above.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Probability that fleeing a fight succeeds.
    #[serde(default = "default_flee_chance")]
    pub flee_chance: f64,
    /// Probability that resting in the dungeon is interrupted by a monster.
    #[serde(default = "default_rest_ambush_chance")]
    pub rest_ambush_chance: f64,
    /// Scale enemy hp/damage/xp by player level. When false, base roster stats are used.
    #[serde(default = "default_true")]
    pub scale_with_level: bool,
    /// Pin the RNG seed for new sessions (reproducible runs). Random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub start: StartingStats,
    #[serde(default)]
    pub encounters: EncounterWeights,
    #[serde(default)]
    pub shop: ShopConfig,
}

fn default_flee_chance() -> f64 {
    0.7
}

fn default_rest_ambush_chance() -> f64 {
    0.25
}

fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            flee_chance: default_flee_chance(),
            rest_ambush_chance: default_rest_ambush_chance(),
            scale_with_level: true,
            seed: None,
            start: StartingStats::default(),
            encounters: EncounterWeights::default(),
            shop: ShopConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingStats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub gold: i32,
    pub xp: i32,
    pub level: u32,
}

impl Default for StartingStats {
    fn default() -> Self {
        StartingStats {
            hp: 100,
            max_hp: 100,
            attack: 15,
            gold: 50,
            xp: 0,
            level: 1,
        }
    }
}

/// Relative weights; they need not sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterWeights {
    pub monster: u32,
    pub treasure: u32,
    pub trap: u32,
    pub rest: u32,
}

impl Default for EncounterWeights {
    fn default() -> Self {
        EncounterWeights {
            monster: 50,
            treasure: 25,
            trap: 15,
            rest: 10,
        }
    }
}

impl EncounterWeights {
    pub fn total(&self) -> u64 {
        self.monster as u64 + self.treasure as u64 + self.trap as u64 + self.rest as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub blade_price: i32,
    pub blade_attack: i32,
    pub tonic_price: i32,
    pub tonic_max_hp: i32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            blade_price: 30,
            blade_attack: 5,
            tonic_price: 40,
            tonic_max_hp: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, falling back to Warn for unknown values.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the state machine cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.game.validate()
    }
}

impl GameConfig {
    /// Checked by both [`Config::load`] and `Dungeon::new`, so a config built in code
    /// gets the same treatment as one read from disk.
    pub fn validate(&self) -> Result<()> {
        if self.encounters.total() == 0 {
            return Err(anyhow!("game.encounters: at least one weight must be non-zero"));
        }
        for (name, p) in [
            ("flee_chance", self.flee_chance),
            ("rest_ambush_chance", self.rest_ambush_chance),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&p) {
                return Err(anyhow!("game.{} must be within 0.0..=1.0 (got {})", name, p));
            }
        }
        let start = &self.start;
        if start.max_hp <= 0 || start.hp <= 0 {
            return Err(anyhow!("game.start: hp and max_hp must be positive"));
        }
        if start.hp > start.max_hp {
            return Err(anyhow!(
                "game.start: hp ({}) exceeds max_hp ({})",
                start.hp,
                start.max_hp
            ));
        }
        if start.level == 0 {
            return Err(anyhow!("game.start.level must be at least 1"));
        }
        if self.shop.blade_price < 0 || self.shop.tonic_price < 0 {
            return Err(anyhow!("game.shop: prices cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_opening_values() {
        let cfg = Config::default();
        let s = &cfg.game.start;
        assert_eq!((s.hp, s.max_hp, s.attack, s.gold, s.xp, s.level), (100, 100, 15, 50, 0, 1));
        assert_eq!(cfg.game.encounters.total(), 100);
        assert_eq!(cfg.game.flee_chance, 0.7);
        assert!(cfg.game.scale_with_level);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("[game]\nflee_chance = 0.5\n[game.start]\ngold = 5\n")
            .expect("parse");
        assert_eq!(cfg.game.flee_chance, 0.5);
        assert_eq!(cfg.game.start.gold, 5);
        assert_eq!(cfg.game.start.hp, 100);
        assert_eq!(cfg.game.encounters.monster, 50);
        assert_eq!(cfg.storage.data_dir, "./data");
        assert_eq!(cfg.logging.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.game.encounters = EncounterWeights {
            monster: 0,
            treasure: 0,
            trap: 0,
            rest: 0,
        };
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.game.flee_chance = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.game.rest_ambush_chance = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.game.start.hp = 120;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.game.start.level = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_config_serializes_to_toml() {
        let s = toml::to_string_pretty(&Config::default()).expect("serialize");
        assert!(s.contains("[game.start]"));
        assert!(s.contains("flee_chance = 0.7"));
        let back: Config = toml::from_str(&s).expect("reparse");
        assert_eq!(back.game.shop, ShopConfig::default());
    }
}
