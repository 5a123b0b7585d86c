//! Player name validation and save-file name encoding

use std::collections::HashSet;

pub const MAX_PLAYER_NAME: usize = 32;

/// Player name validation errors with helpful messages
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlayerNameError {
    #[error("Player name is empty")]
    Empty,

    #[error("Player name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Player name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },

    #[error("Player name contains path separators (/ or \\)")]
    PathTraversal,
}

/// Generate safe filename from a player name using URL encoding
pub fn safe_filename(name: &str) -> String {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    utf8_percent_encode(name, NON_ALPHANUMERIC).to_string()
}

/// Validate a player name; returns the trimmed name.
///
/// Unicode letters and spaces are fine (the name is percent-encoded on disk), but
/// control characters and anything resembling a path are not.
pub fn validate_player_name(name: &str) -> Result<String, PlayerNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlayerNameError::Empty);
    }
    if trimmed.chars().count() > MAX_PLAYER_NAME {
        return Err(PlayerNameError::TooLong {
            max: MAX_PLAYER_NAME,
        });
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(PlayerNameError::PathTraversal);
    }
    let fs_reserved = ['<', '>', ':', '"', '|', '?', '*'];
    let invalid: HashSet<char> = trimmed
        .chars()
        .filter(|c| c.is_control() || fs_reserved.contains(c))
        .collect();
    if !invalid.is_empty() {
        let chars = invalid
            .into_iter()
            .map(|c| format!("\\u{{{:04x}}}", c as u32))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PlayerNameError::InvalidCharacters { chars });
    }
    Ok(trimmed.to_string())
}
