//! # Dungeon Door - a compact, action-driven text adventure
//!
//! Dungeon Door is a single-player dungeon crawl played one button press at a time.
//! Every action (explore, fight, flee, rest, shop, reset) is a transition of a small
//! state machine over an explicit [`game::Session`], so any shell can drive it: the
//! bundled console binary, a test harness, or a web front end.
//!
//! ## Features
//!
//! - **Four-state machine**: explore, fight, shop and game over, with guarded transitions.
//! - **Weighted encounters**: monster/treasure/trap/rest outcomes from a reseedable
//!   categorical distribution; every turn is reproducible from the session seed.
//! - **Progression**: xp thresholds of `level × 50`, level-scaled monsters, a two-item shop.
//! - **Saves**: per-player JSON sessions written atomically under a file lock.
//! - **Configurable**: balance knobs and starting stats in a TOML file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dungeondoor::config::Config;
//! use dungeondoor::game::{render, Action, Dungeon, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let dungeon = Dungeon::new(config.game.clone())?;
//!     let store = SessionStore::new(&config.storage.data_dir);
//!
//!     let (mut session, _is_new) = store.load_or_new("alice", &dungeon)?;
//!     dungeon.handle_action(&mut session, Action::Explore)?;
//!     println!("{}", render::render(&session));
//!     store.save("alice", &session)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - State machine, combat, encounters, shop, rendering and saves
//! - [`config`] - Configuration loading and validation
//! - [`validation`] - Player name validation and file name encoding
//! - [`logutil`] - Log sanitizing helpers

pub mod config;
pub mod game;
pub mod logutil;
pub mod validation;
