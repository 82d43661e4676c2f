use tokio::sync::mpsc::channel;

use crate::matching::Candidate;
use crate::ports::navidrome::NavidromeClient;
use crate::services::navidrome::ServerInfo;
use crate::services::search::{SearchEvent, run_search};

pub fn candidate(id: &str, title: &str, artist: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: String::new(),
        path: String::new(),
    }
}

pub fn server_info() -> ServerInfo {
    ServerInfo {
        server_url: "http://localhost:4533".to_string(),
        user: "alice".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Runs a whole search batch and returns every emitted event in order.
pub async fn collect_events(client: &dyn NavidromeClient, items: Vec<String>) -> Vec<SearchEvent> {
    // Large enough that the producer never blocks on an unread channel.
    let (tx, mut rx) = channel(2 * items.len() + 1);
    run_search(client, items, tx).await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}
