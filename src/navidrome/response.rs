use serde_json::Value;

use super::NavidromeError;
use crate::matching::Candidate;

/* ---------- Envelope ---------- */

/// Subsonic error code for a wrong username or password.
const AUTH_ERROR_CODE: i64 = 40;

/// Unwraps `subsonic-response` and turns a failed status into an error.
pub fn check_envelope(payload: &Value) -> Result<&Value, NavidromeError> {
    let envelope = payload
        .get("subsonic-response")
        .ok_or_else(|| NavidromeError::Decode("missing subsonic-response".to_string()))?;

    let status = envelope
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if status == "ok" {
        return Ok(envelope);
    }

    let error = envelope.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_i64)
        .unwrap_or_default();
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("Subsonic returned status \"{status}\""));

    if code == AUTH_ERROR_CODE {
        return Err(NavidromeError::Auth(message));
    }
    Err(NavidromeError::Api { code, message })
}

/* ---------- search3 ---------- */

/// Pulls the song list out of a `search3` envelope.
///
/// Servers disagree on where songs live: directly under `song`, under
/// `child`, or wrapped as `match[].song`. The first non-empty variant wins,
/// in that order. A missing result section means no hits.
pub fn extract_candidates(envelope: &Value) -> Vec<Candidate> {
    let Some(result) = envelope.get("searchResult3") else {
        return Vec::new();
    };

    let songs = array_or_single(result.get("song"));
    if !songs.is_empty() {
        return songs.into_iter().map(parse_candidate).collect();
    }

    let children = array_or_single(result.get("child"));
    if !children.is_empty() {
        return children.into_iter().map(parse_candidate).collect();
    }

    array_or_single(result.get("match"))
        .into_iter()
        .filter_map(|m| m.get("song"))
        .map(parse_candidate)
        .collect()
}

fn array_or_single(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => Vec::new(),
    }
}

fn parse_candidate(song: &Value) -> Candidate {
    Candidate {
        id: field(song, "id"),
        title: field(song, "title"),
        artist: field(song, "artist"),
        album: field(song, "album"),
        path: field(song, "path"),
    }
}

/// Reads a field as text; some servers send numeric ids.
fn field(song: &Value, key: &str) -> String {
    match song.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
