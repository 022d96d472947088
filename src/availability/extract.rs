use super::types::TmdbId;
use regex::Regex;
use std::sync::LazyLock;

/// Bracket tag written into library paths by media organizers: `[tmdbid-603]`
static TMDB_ID_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[tmdbid-(\d+)\]").expect("Invalid tmdbid regex"));

/// Extract a TMDB ID from a filename or library path.
///
/// The match is substring-based, so the tag may appear anywhere in the
/// string. Returns `None` when no tag is present; absence is a normal
/// outcome, not an error.
#[must_use]
pub fn tmdb_id_from_path(path: &str) -> Option<TmdbId> {
    TMDB_ID_TAG
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| TmdbId::new(m.as_str()))
}
