use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::NavidromeConfig;
use crate::matching::Candidate;
use crate::navidrome::{self, Credentials, NavidromeError};
use crate::ports::navidrome::NavidromeClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NavidromeHttpAdapter {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl NavidromeHttpAdapter {
    pub fn new(config: &NavidromeConfig) -> Result<Self, NavidromeError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            credentials: Credentials {
                user: config.user.clone(),
                password: config.password.clone(),
            },
        })
    }
}

#[async_trait::async_trait]
impl NavidromeClient for NavidromeHttpAdapter {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, NavidromeError> {
        navidrome::search(&self.client, &self.base_url, &self.credentials, query).await
    }

    async fn create_playlist(
        &self,
        name: &str,
        song_ids: &[String],
    ) -> Result<(), NavidromeError> {
        navidrome::create_playlist(
            &self.client,
            &self.base_url,
            &self.credentials,
            name,
            song_ids,
        )
        .await
    }

    async fn ping(&self) -> Result<(), NavidromeError> {
        navidrome::ping(&self.client, &self.base_url, &self.credentials).await
    }
}
