//! Matching of free-text "title - artist" lines against library search results.
//!
//! The remote search is fuzzy and returns plenty of noise, so every candidate is
//! re-checked here with normalized title and artist comparisons before it is
//! offered back to the user.

pub mod filter;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use filter::filter_with_fallback;

/// A track returned by the library search.
///
/// All fields are passed through untouched; only `id` carries meaning when a
/// playlist is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub path: String,
}

/// Title and (possibly empty) artist extracted from one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Unique,
    Multiple,
    Missing,
}

impl MatchStatus {
    /// Status is purely a function of how many songs end up in the result.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => MatchStatus::Missing,
            1 => MatchStatus::Unique,
            _ => MatchStatus::Multiple,
        }
    }
}

/// Title/artist separators: ASCII hyphen, en dash, em dash, full-width hyphen.
const SEPARATORS: &[&str] = &[" - ", " – ", " — ", " － "];

/// Splits `"title - artist"` on the leftmost recognized separator.
///
/// Lines without a separator become a title-only query.
pub fn parse_song_line(line: &str) -> ParsedQuery {
    let line = line.trim();

    let split = SEPARATORS
        .iter()
        .filter_map(|sep| line.find(sep).map(|index| (index, sep.len())))
        .min_by_key(|(index, _)| *index);

    match split {
        Some((index, sep_len)) => ParsedQuery {
            title: line[..index].trim().to_string(),
            artist: line[index + sep_len..].trim().to_string(),
        },
        None => ParsedQuery {
            title: line.to_string(),
            artist: String::new(),
        },
    }
}
