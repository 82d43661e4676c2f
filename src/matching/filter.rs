use super::Candidate;
use super::normalize::{normalize_title, remove_all_space};

/// Artist check: the library artist only has to contain the requested one.
///
/// Library artist fields often list several performers ("五月天 • 纪晓君") or
/// space names inconsistently ("五 月天"), so both sides are compared without
/// whitespace and case.
pub fn artist_matches(song_artist: &str, input_artist: &str) -> bool {
    if input_artist.is_empty() {
        return true;
    }
    let song_artist = remove_all_space(song_artist).to_lowercase();
    let input_artist = remove_all_space(input_artist).to_lowercase();
    song_artist.contains(&input_artist)
}

/// Title check on normalized titles: equal, or either one contains the other.
pub fn title_matches(song_title: &str, input_title: &str) -> bool {
    let song_title = normalize_title(song_title);
    let input_title = normalize_title(input_title);
    song_title == input_title
        || song_title.contains(&input_title)
        || input_title.contains(&song_title)
}

/// Keeps the candidates passing both the artist and the title check.
pub fn filter_candidates(
    candidates: &[Candidate],
    input_title: &str,
    input_artist: &str,
) -> Vec<Candidate> {
    let mut kept = Vec::new();

    for candidate in candidates {
        let artist_ok = artist_matches(&candidate.artist, input_artist);
        let title_ok = title_matches(&candidate.title, input_title);

        if artist_ok && title_ok {
            kept.push(candidate.clone());
            continue;
        }

        if !artist_ok {
            tracing::debug!(
                song_id = %candidate.id,
                "Artist mismatch: [{}] vs [{}]",
                candidate.artist,
                input_artist
            );
        }
        if !title_ok {
            tracing::debug!(
                song_id = %candidate.id,
                "Title mismatch: [{}] vs [{}]",
                candidate.title,
                input_title
            );
        }
    }

    kept
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub songs: Vec<Candidate>,
    /// True when nothing passed the filter and the raw candidates were returned instead.
    pub degraded: bool,
}

/// Filters candidates, falling back to the unfiltered list when the filter
/// rejects every one of them.
///
/// The user then picks manually from all search hits instead of getting a
/// "missing" verdict for a song the library might well have.
pub fn filter_with_fallback(
    candidates: Vec<Candidate>,
    input_title: &str,
    input_artist: &str,
) -> FilterOutcome {
    let filtered = filter_candidates(&candidates, input_title, input_artist);

    if filtered.is_empty() && !candidates.is_empty() {
        return FilterOutcome {
            songs: candidates,
            degraded: true,
        };
    }

    FilterOutcome {
        songs: filtered,
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchStatus;
    use crate::test_utils::candidate;

    #[test]
    fn test_artist_matches_ignores_spacing() {
        assert!(artist_matches("五 月天", "五月天"));
        assert!(artist_matches("五月天", "五 月 天"));
    }

    #[test]
    fn test_artist_matches_empty_input() {
        assert!(artist_matches("Jay Chou", ""));
        assert!(artist_matches("", ""));
    }

    #[test]
    fn test_artist_matches_substring_and_case() {
        assert!(artist_matches("五月天 • 纪晓君", "五月天"));
        assert!(artist_matches("JAY CHOU", "jay chou"));
        assert!(!artist_matches("五月天", "五月天 • 纪晓君"));
        assert!(!artist_matches("Adele", "Jay Chou"));
    }

    #[test]
    fn test_title_matches_three_ways() {
        assert!(title_matches("Hello", "hello"));
        // Library title over-specified
        assert!(title_matches("倔强 (还你自由版)", "倔强"));
        assert!(title_matches("Love Story - Taylor's Version", "Love Story"));
        // User input under-specified the other way round
        assert!(title_matches("Bohemian", "Bohemian Rhapsody"));
        assert!(!title_matches("Yesterday", "Let It Be"));
    }

    #[test]
    fn test_filter_candidates_keeps_both_checks() {
        let candidates = vec![
            candidate("1", "倔强", "五月天"),
            candidate("2", "倔强", "其他歌手"),
            candidate("3", "温柔", "五月天"),
            candidate("4", "倔强 (Live)", "五 月天"),
        ];

        let kept = filter_candidates(&candidates, "倔强", "五月天");
        let ids: Vec<_> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_filter_candidates_preserves_order() {
        let candidates = vec![
            candidate("b", "Song", "X"),
            candidate("a", "Song (Remix)", "X"),
        ];
        let kept = filter_candidates(&candidates, "song", "");
        assert_eq!(kept, candidates);
    }

    #[test]
    fn test_fallback_returns_raw_candidates_when_all_rejected() {
        let candidates = vec![candidate("1", "A", "X")];

        assert!(filter_candidates(&candidates, "A", "Y").is_empty());

        let outcome = filter_with_fallback(candidates.clone(), "A", "Y");
        assert!(outcome.degraded);
        assert_eq!(outcome.songs, candidates);
        assert_eq!(MatchStatus::from_count(outcome.songs.len()), MatchStatus::Unique);
    }

    #[test]
    fn test_fallback_not_used_when_something_matches() {
        let candidates = vec![candidate("1", "A", "X"), candidate("2", "B", "X")];
        let outcome = filter_with_fallback(candidates, "A", "X");
        assert!(!outcome.degraded);
        assert_eq!(outcome.songs.len(), 1);
        assert_eq!(outcome.songs[0].id, "1");
    }

    #[test]
    fn test_fallback_with_no_candidates() {
        let outcome = filter_with_fallback(Vec::new(), "A", "X");
        assert!(!outcome.degraded);
        assert!(outcome.songs.is_empty());
    }
}
