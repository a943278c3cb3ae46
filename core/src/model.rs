use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One track from the song catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub artist: String,
    pub song: String,
    #[serde(rename = "ytId")]
    pub yt_id: String,
    pub genres: Vec<String>,
    /// Similarity score, set only when this song appears as a retrieval
    /// candidate; never present on canonical catalog records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One retrieval algorithm's precomputed output: source song id mapped to
/// its ranked candidates as `[candidateId, score]` pairs, best first.
/// Produced upstream already sorted; never reordered here.
pub type RetrievalSet = HashMap<String, Vec<(String, f64)>>;
