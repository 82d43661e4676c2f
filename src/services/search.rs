use serde::Serialize;
use tokio::sync::mpsc::Sender;

use crate::matching::{Candidate, MatchStatus, filter_with_fallback, parse_song_line};
use crate::ports::navidrome::NavidromeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Searching,
}

/// One line of the NDJSON search stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchEvent {
    Progress {
        index: usize,
        total: usize,
        query: String,
        status: ProgressStatus,
    },
    Result {
        index: usize,
        total: usize,
        query: String,
        status: MatchStatus,
        songs: Vec<Candidate>,
    },
    Done,
}

impl SearchEvent {
    fn result(index: usize, total: usize, query: &str, songs: Vec<Candidate>) -> Self {
        SearchEvent::Result {
            index,
            total,
            query: query.to_string(),
            status: MatchStatus::from_count(songs.len()),
            songs,
        }
    }
}

/// Searches every item in order and reports progress on `tx`.
///
/// Lines are handled one at a time with at most one search in flight. A failed
/// search only marks its own line as missing. When the receiving side goes
/// away the loop stops before issuing another search.
pub async fn run_search(
    client: &dyn NavidromeClient,
    items: Vec<String>,
    tx: Sender<SearchEvent>,
) {
    let total = items.len();

    for (index, raw) in items.iter().enumerate() {
        let query = raw.trim();
        if query.is_empty() {
            if tx.send(SearchEvent::result(index, total, raw, Vec::new())).await.is_err() {
                return;
            }
            continue;
        }

        let progress = SearchEvent::Progress {
            index,
            total,
            query: query.to_string(),
            status: ProgressStatus::Searching,
        };
        if tx.send(progress).await.is_err() {
            tracing::debug!("Search stream closed by client at item {}/{}", index + 1, total);
            return;
        }

        // Only the title goes to the server; the artist is checked locally.
        let parsed = parse_song_line(query);
        let songs = match client.search(&parsed.title).await {
            Ok(candidates) => {
                let outcome = filter_with_fallback(candidates, &parsed.title, &parsed.artist);
                if outcome.degraded {
                    tracing::info!(
                        "No match passed the filter for [{}], returning all {} search results",
                        query,
                        outcome.songs.len()
                    );
                }
                outcome.songs
            }
            Err(e) => {
                tracing::warn!("Search failed for [{}]: {}", query, e);
                Vec::new()
            }
        };

        if tx.send(SearchEvent::result(index, total, query, songs)).await.is_err() {
            return;
        }
    }

    let _ = tx.send(SearchEvent::Done).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navidrome::NavidromeError;
    use crate::ports::navidrome::MockNavidromeClient;
    use crate::test_utils::{candidate, collect_events};
    use tokio::sync::mpsc::channel;

    fn statuses(events: &[SearchEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| serde_json::to_value(e).unwrap())
            .map(|v| {
                format!(
                    "{}:{}",
                    v["type"].as_str().unwrap(),
                    v["status"].as_str().unwrap_or("-")
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failed_line_does_not_abort_batch() {
        let mut client = MockNavidromeClient::new();
        client.expect_search().times(3).returning(|query| match query {
            "倔强" => Ok(vec![candidate("1", "倔强", "五月天")]),
            "Hello" => Ok(vec![
                candidate("2", "Hello", "Adele"),
                candidate("3", "Hello (Live)", "Adele"),
            ]),
            _ => Err(NavidromeError::Decode("bad body".into())),
        });

        let items = vec![
            "倔强 - 五月天".to_string(),
            "Broken".to_string(),
            "Hello - Adele".to_string(),
        ];
        let events = collect_events(&client, items).await;

        assert_eq!(
            statuses(&events),
            vec![
                "progress:searching",
                "result:unique",
                "progress:searching",
                "result:missing",
                "progress:searching",
                "result:multiple",
                "done:-",
            ]
        );
        assert_eq!(
            events[3],
            SearchEvent::Result {
                index: 1,
                total: 3,
                query: "Broken".to_string(),
                status: MatchStatus::Missing,
                songs: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_blank_line_skips_search() {
        let mut client = MockNavidromeClient::new();
        client.expect_search().never();

        let events = collect_events(&client, vec!["   ".to_string()]).await;

        assert_eq!(
            events,
            vec![
                SearchEvent::Result {
                    index: 0,
                    total: 1,
                    query: "   ".to_string(),
                    status: MatchStatus::Missing,
                    songs: vec![],
                },
                SearchEvent::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_degraded_result_keeps_raw_candidates() {
        let mut client = MockNavidromeClient::new();
        client
            .expect_search()
            .returning(|_| Ok(vec![candidate("1", "A", "X")]));

        let events = collect_events(&client, vec!["A - Y".to_string()]).await;

        match &events[1] {
            SearchEvent::Result { status, songs, query, .. } => {
                assert_eq!(*status, MatchStatus::Unique);
                assert_eq!(songs.len(), 1);
                assert_eq!(query, "A - Y");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_search_result_is_missing() {
        let mut client = MockNavidromeClient::new();
        client.expect_search().returning(|_| Ok(vec![]));

        let events = collect_events(&client, vec!["Nothing".to_string()]).await;
        assert_eq!(statuses(&events), vec!["progress:searching", "result:missing", "done:-"]);
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let mut client = MockNavidromeClient::new();
        client.expect_search().never();

        let (tx, rx) = channel(8);
        drop(rx);
        run_search(&client, vec!["a".to_string(), "b".to_string()], tx).await;
    }

    #[test]
    fn test_event_wire_format() {
        let progress = SearchEvent::Progress {
            index: 0,
            total: 2,
            query: "q".into(),
            status: ProgressStatus::Searching,
        };
        assert_eq!(
            serde_json::to_value(&progress).unwrap(),
            serde_json::json!({
                "type": "progress", "index": 0, "total": 2, "query": "q", "status": "searching"
            })
        );

        let result = SearchEvent::result(1, 2, "q", vec![candidate("7", "T", "A")]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "type": "result", "index": 1, "total": 2, "query": "q", "status": "unique",
                "songs": [{"id": "7", "title": "T", "artist": "A", "album": "", "path": ""}]
            })
        );

        assert_eq!(
            serde_json::to_value(SearchEvent::Done).unwrap(),
            serde_json::json!({"type": "done"})
        );
    }
}
