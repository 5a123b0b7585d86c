//! Per-player session saves.
//!
//! Persistence: JSON at `<data_dir>/sessions/<player>.json` (player name percent-encoded)
//! using an exclusive lock plus atomic write+rename, so a crash mid-save never leaves a
//! truncated file behind. A save that fails to parse is logged and treated as absent.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::engine::Dungeon;
use super::errors::GameError;
use super::types::Session;
use crate::logutil::escape_log;
use crate::validation::{safe_filename, validate_player_name};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub saved_at: DateTime<Utc>,
    pub session: Session,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &str) -> Self {
        SessionStore {
            dir: Path::new(data_dir).join("sessions"),
        }
    }

    pub fn path_for(&self, player: &str) -> Result<PathBuf, GameError> {
        let name = validate_player_name(player)
            .map_err(|_| GameError::InvalidPlayerName(player.to_string()))?;
        Ok(self.dir.join(format!("{}.json", safe_filename(&name))))
    }

    pub fn save(&self, player: &str, session: &Session) -> Result<(), GameError> {
        let path = self.path_for(player)?;
        let file = SaveFile {
            saved_at: Utc::now(),
            session: session.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        write_json_atomic(&path, &content)?;
        debug!("saved session for {} at turn {}", escape_log(player), session.turn);
        Ok(())
    }

    pub fn load_save(&self, player: &str) -> Result<Option<SaveFile>, GameError> {
        let path = self.path_for(player)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<SaveFile>(&content) {
            Ok(save) => Ok(Some(save)),
            Err(e) => {
                warn!("ignoring unreadable save {:?}: {}", path, e);
                Ok(None)
            }
        }
    }

    pub fn load(&self, player: &str) -> Result<Option<Session>, GameError> {
        Ok(self.load_save(player)?.map(|s| s.session))
    }

    /// Resume the player's saved session or start a new one. The flag is true for new sessions.
    pub fn load_or_new(&self, player: &str, dungeon: &Dungeon) -> Result<(Session, bool), GameError> {
        match self.load(player)? {
            Some(mut session) => {
                // Repair saves edited by hand so the hp invariant holds on resume
                session.player.hp = session.player.hp.clamp(0, session.player.max_hp.max(0));
                Ok((session, false))
            }
            None => Ok((dungeon.new_session(), true)),
        }
    }

    /// Remove a save and its lock sidecar. Returns false if there was nothing to remove.
    pub fn delete(&self, player: &str) -> Result<bool, GameError> {
        let path = self.path_for(player)?;
        let lock_path = path.with_extension("lock");
        if lock_path.exists() {
            std::fs::remove_file(&lock_path)?;
        }
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }
}

fn write_json_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    // Lock a sidecar so concurrent writers serialize without truncating the live save
    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&lock_path)?;
    lock_file.lock_exclusive()?;
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                let written = tmp.write_all(content.as_bytes()).and_then(|_| tmp.flush());
                if let Err(e) = written {
                    drop(tmp);
                    let _ = std::fs::remove_file(&cand);
                    return Err(e);
                }
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => return Err(e),
        }
    };
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    let _ = lock_file.unlock();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::types::Action;

    #[test]
    fn missing_save_starts_new_session() {
        let td = tempfile::tempdir().unwrap();
        let store = SessionStore::new(td.path().to_str().unwrap());
        let d = Dungeon::new(GameConfig::default()).unwrap();
        assert!(store.load("alice").unwrap().is_none());
        let (s, is_new) = store.load_or_new("alice", &d).unwrap();
        assert!(is_new);
        assert_eq!(s.turn, 0);
    }

    #[test]
    fn save_then_load_resumes_session() {
        let td = tempfile::tempdir().unwrap();
        let store = SessionStore::new(td.path().to_str().unwrap());
        let d = Dungeon::new(GameConfig::default()).unwrap();
        let mut s = d.new_session_with_seed(77);
        d.handle_action(&mut s, Action::Explore).unwrap();
        store.save("alice", &s).unwrap();
        let (back, is_new) = store.load_or_new("alice", &d).unwrap();
        assert!(!is_new);
        assert_eq!(back, s);
        assert!(store.delete("alice").unwrap());
        assert!(!store.delete("alice").unwrap());
    }

    #[test]
    fn saves_leave_no_temp_files_and_delete_clears_lock() {
        let td = tempfile::tempdir().unwrap();
        let store = SessionStore::new(td.path().to_str().unwrap());
        let d = Dungeon::new(GameConfig::default()).unwrap();
        let s = d.new_session_with_seed(3);
        store.save("erin", &s).unwrap();
        store.save("erin", &s).unwrap();

        let dir = td.path().join("sessions");
        let mut names: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["erin.json", "erin.lock"]);

        assert!(store.delete("erin").unwrap());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn corrupt_save_is_ignored() {
        let td = tempfile::tempdir().unwrap();
        let store = SessionStore::new(td.path().to_str().unwrap());
        let path = store.path_for("bob").unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(store.load("bob").unwrap().is_none());
    }

    #[test]
    fn names_are_encoded_and_validated() {
        let store = SessionStore::new("/tmp/dd");
        let p = store.path_for("Sir Robin").unwrap();
        assert_eq!(p.file_name().unwrap().to_str().unwrap(), "Sir%20Robin.json");
        assert!(matches!(
            store.path_for("../evil"),
            Err(GameError::InvalidPlayerName(_))
        ));
        assert!(matches!(
            store.path_for("   "),
            Err(GameError::InvalidPlayerName(_))
        ));
    }
}
