use crate::matching::Candidate;
use crate::navidrome::NavidromeError;

/// Port trait wrapping the Navidrome (Subsonic) capabilities used by business logic.
///
/// Implementations live in `services::navidrome::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait NavidromeClient: Send + Sync {
    /// Returns an empty list, not an error, when nothing matches.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, NavidromeError>;

    /// Creates the playlist with all `song_ids` in one request.
    async fn create_playlist(
        &self,
        name: &str,
        song_ids: &[String],
    ) -> Result<(), NavidromeError>;

    async fn ping(&self) -> Result<(), NavidromeError>;
}
