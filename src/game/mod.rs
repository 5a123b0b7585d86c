//! # Dungeon Door game core
//!
//! A single-player, turn-based dungeon crawl driven by named actions. Each call to
//! [`Dungeon::handle_action`] applies one action to a [`Session`] and rewrites its story
//! line; the caller re-renders the whole view afterwards with [`render::render`].
//!
//! ## Module Organization
//!
//! - [`types`] - `Player`, `Enemy`, `GameState`, `Action`, `Session`
//! - [`engine`] - the state machine ([`Dungeon`])
//! - [`encounter`] - weighted explore outcomes and the monster roster
//! - [`combat`] - attack turns, fleeing, level-ups
//! - [`shop`] - the two purchasable items
//! - [`render`] - compact text view and help
//! - [`store`] - per-player JSON saves
//! - [`errors`] - [`GameError`]
//!
//! ## Example
//!
//! ```rust
//! use dungeondoor::config::GameConfig;
//! use dungeondoor::game::{Action, Dungeon, GameState};
//!
//! let dungeon = Dungeon::new(GameConfig::default()).unwrap();
//! let mut session = dungeon.new_session_with_seed(42);
//! dungeon.handle_action(&mut session, Action::GotoShop).unwrap();
//! assert_eq!(session.state, GameState::Shop);
//! ```

pub mod combat;
pub mod encounter;
pub mod engine;
pub mod errors;
pub mod render;
pub mod shop;
pub mod store;
pub mod types;

pub use engine::Dungeon;
pub use errors::GameError;
pub use store::SessionStore;
pub use types::{Action, Enemy, GameState, Player, Session};
