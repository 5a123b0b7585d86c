//! Shared helpers for integration tests.

use dungeondoor::config::GameConfig;
use dungeondoor::game::{Action, Dungeon, GameState, Session, SessionStore};

pub fn dungeon() -> Dungeon {
    Dungeon::new(GameConfig::default()).expect("default config is valid")
}

/// A store rooted in a fresh temp dir. Keep the TempDir alive for the test's duration.
#[allow(dead_code)]
pub fn temp_store() -> (tempfile::TempDir, SessionStore) {
    let td = tempfile::tempdir().expect("tempdir");
    let store = SessionStore::new(&td.path().to_string_lossy());
    (td, store)
}

/// Deterministic "aggressive" policy: explore, always fight, leave the shop.
#[allow(dead_code)]
pub fn aggressive(session: &Session) -> Option<Action> {
    match session.state {
        GameState::Explore => Some(Action::Explore),
        GameState::Fight => Some(Action::Fight),
        GameState::Shop => Some(Action::GotoExplore),
        GameState::GameOver => None,
    }
}
