use crate::matching::Candidate;
use crate::ports::navidrome::NavidromeClient;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Playlist name must not be empty")]
    EmptyName,
    #[error("Select at least one song")]
    NoSongs,
    #[error("None of the selected songs has a valid id")]
    NoValidIds,
    /// Failure reported by the server, message passed through as-is.
    #[error("{0}")]
    Remote(String),
}

impl GenerateError {
    /// True for errors caused by the request itself rather than the server.
    pub fn is_validation(&self) -> bool {
        !matches!(self, GenerateError::Remote(_))
    }
}

/// A validated playlist: trimmed name and at least one non-blank song id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRequest {
    pub name: String,
    pub song_ids: Vec<String>,
}

impl PlaylistRequest {
    pub fn from_selection(name: &str, songs: &[Candidate]) -> Result<Self, GenerateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GenerateError::EmptyName);
        }
        if songs.is_empty() {
            return Err(GenerateError::NoSongs);
        }

        let song_ids: Vec<String> = songs
            .iter()
            .map(|song| song.id.trim())
            .filter(|id| !id.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if song_ids.is_empty() {
            return Err(GenerateError::NoValidIds);
        }

        Ok(Self {
            name: name.to_string(),
            song_ids,
        })
    }
}

/// Validates the selection and creates the playlist in a single server call.
pub async fn generate_playlist(
    client: &dyn NavidromeClient,
    name: &str,
    songs: &[Candidate],
) -> Result<PlaylistRequest, GenerateError> {
    let request = PlaylistRequest::from_selection(name, songs)?;

    client
        .create_playlist(&request.name, &request.song_ids)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create playlist [{}]: {}", request.name, e);
            GenerateError::Remote(e.to_string())
        })?;

    tracing::info!(
        "Created playlist [{}] with {} songs",
        request.name,
        request.song_ids.len()
    );
    Ok(request)
}
