use crate::catalog::Catalog;
use crate::sample::Sampler;
use crate::{RetrievalSet, Song};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Length of every result list on a song page, the random sample included.
pub const RESULT_COUNT: usize = 10;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The requested page does not exist.
    #[error("song `{0}` not found")]
    SongNotFound(String),
    /// A retrieval list references a song the catalog does not know. The
    /// precomputed data is inconsistent with the catalog.
    #[error("retrieval `{retrieval}` references unknown song `{candidate}`")]
    UnknownCandidate { retrieval: String, candidate: String },
}

/// View data for one song page: the song itself plus one ordered result
/// list per key (`random` and each covering retrieval algorithm).
#[derive(Debug, Serialize)]
pub struct SongPage {
    pub song: Song,
    pub results: BTreeMap<String, Vec<Song>>,
}

/// Join `song_id` against the catalog and every retrieval set.
///
/// A retrieval with no entry for the song is skipped; a retrieval whose
/// candidate id has no catalog record fails the whole page.
pub fn resolve_page(
    song_id: &str,
    catalog: &Catalog,
    retrievals: &BTreeMap<String, RetrievalSet>,
    sampler: &dyn Sampler,
) -> Result<SongPage, ResolveError> {
    let song = catalog
        .get(song_id)
        .cloned()
        .ok_or_else(|| ResolveError::SongNotFound(song_id.to_string()))?;

    let mut results = BTreeMap::new();
    results.insert(
        "random".to_string(),
        sampler.sample(catalog.songs(), RESULT_COUNT),
    );

    for (name, set) in retrievals {
        let ranked = match set.get(&song.id) {
            Some(ranked) => ranked,
            None => {
                tracing::debug!(retrieval = %name, song = %song.id, "no results");
                continue;
            }
        };
        let mut scored = Vec::with_capacity(ranked.len().min(RESULT_COUNT));
        for (candidate_id, score) in ranked.iter().take(RESULT_COUNT) {
            let candidate =
                catalog
                    .get(candidate_id)
                    .ok_or_else(|| ResolveError::UnknownCandidate {
                        retrieval: name.clone(),
                        candidate: candidate_id.clone(),
                    })?;
            let mut candidate = candidate.clone();
            candidate.score = Some(*score);
            scored.push(candidate);
        }
        results.insert(name.clone(), scored);
    }

    Ok(SongPage { song, results })
}
