use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::matching::Candidate;

pub mod response;

/// Docs:
/// https://opensubsonic.netlify.app/docs/api-reference/
pub const API_VERSION: &str = "1.16.1";
pub const CLIENT_NAME: &str = "NaviPlaylist";
pub const SEARCH_SONG_COUNT: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum NavidromeError {
    #[error("Invalid Navidrome URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to send http request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse Subsonic response: {0}")]
    Decode(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Subsonic API error: {message}")]
    Api { code: i64, message: String },
}

/// Fixed credentials forwarded on every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

fn api_url(
    base_url: &Url,
    credentials: &Credentials,
    method: &str,
    params: &[(&str, &str)],
) -> Result<Url, NavidromeError> {
    let mut url = Url::parse(&format!(
        "{}/rest/{}.view",
        base_url.as_str().trim_end_matches('/'),
        method
    ))?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("u", &credentials.user)
            .append_pair("p", &credentials.password)
            .append_pair("v", API_VERSION)
            .append_pair("c", CLIENT_NAME)
            .append_pair("f", "json");
        for (key, value) in params {
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Request URL with the password parameter masked, for logs.
fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "p" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Issues one GET against the Subsonic REST API and returns the unwrapped
/// `subsonic-response` object.
async fn request(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
    method: &str,
    params: &[(&str, &str)],
) -> Result<Value, NavidromeError> {
    let url = api_url(base_url, credentials, method, params)?;
    tracing::debug!("Subsonic request: {}", redacted(&url));

    let body = client.get(url).send().await?.text().await?;
    tracing::debug!("Subsonic {} response: {}", method, body);

    let payload: Value = serde_json::from_str(&body)
        .map_err(|e| NavidromeError::Decode(format!("{method}: {e}")))?;
    let envelope = response::check_envelope(&payload)?;
    Ok(envelope.clone())
}

/// Searches songs matching `query` (search3).
pub async fn search(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
    query: &str,
) -> Result<Vec<Candidate>, NavidromeError> {
    let song_count = SEARCH_SONG_COUNT.to_string();
    let envelope = request(
        client,
        base_url,
        credentials,
        "search3",
        &[
            ("query", query),
            ("songCount", song_count.as_str()),
            ("albumCount", "0"),
            ("artistCount", "0"),
        ],
    )
    .await?;
    Ok(response::extract_candidates(&envelope))
}

/// Creates a shared playlist holding `song_ids` in order, in one call.
pub async fn create_playlist(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
    name: &str,
    song_ids: &[String],
) -> Result<(), NavidromeError> {
    let mut params = vec![("name", name), ("shared", "true")];
    params.extend(song_ids.iter().map(|id| ("songId", id.as_str())));

    request(client, base_url, credentials, "createPlaylist", &params).await?;
    Ok(())
}

/// Checks connectivity and credentials.
pub async fn ping(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
) -> Result<(), NavidromeError> {
    request(client, base_url, credentials, "ping", &[]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            user: "alice".to_string(),
            password: "s3cret&x".to_string(),
        }
    }

    #[test]
    fn test_api_url_params() {
        let base = Url::parse("http://localhost:4533").unwrap();
        let url =
            api_url(&base, &credentials(), "search3", &[("query", "五月天 倔强")]).unwrap();

        assert_eq!(url.path(), "/rest/search3.view");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("u".into(), "alice".into())));
        assert!(pairs.contains(&("p".into(), "s3cret&x".into())));
        assert!(pairs.contains(&("v".into(), API_VERSION.into())));
        assert!(pairs.contains(&("c".into(), CLIENT_NAME.into())));
        assert!(pairs.contains(&("f".into(), "json".into())));
        assert!(pairs.contains(&("query".into(), "五月天 倔强".into())));
    }

    #[test]
    fn test_api_url_keeps_base_path() {
        let base = Url::parse("https://example.com/navidrome/").unwrap();
        let url = api_url(&base, &credentials(), "ping", &[]).unwrap();
        assert_eq!(url.path(), "/navidrome/rest/ping.view");
    }

    #[test]
    fn test_api_url_repeats_song_ids_in_order() {
        let base = Url::parse("http://localhost:4533").unwrap();
        let url = api_url(
            &base,
            &credentials(),
            "createPlaylist",
            &[("songId", "b"), ("songId", "a")],
        )
        .unwrap();
        let ids: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| *k == "songId")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_redacted_hides_password() {
        let base = Url::parse("http://localhost:4533").unwrap();
        let url = api_url(&base, &credentials(), "ping", &[]).unwrap();
        let logged = redacted(&url);
        assert!(!logged.contains("s3cret"));
        assert!(logged.contains("u=alice"));
    }
}
