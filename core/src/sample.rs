use crate::Song;
use rand::seq::SliceRandom;

/// Strategy for picking the `random` result set on a song page. Injected
/// into the resolver so tests can substitute a deterministic one.
pub trait Sampler: Send + Sync {
    /// Pick up to `count` distinct songs from `songs`.
    fn sample(&self, songs: &[Song], count: usize) -> Vec<Song>;
}

/// Production sampler: unseeded thread RNG, so every page view shows a
/// different sample.
#[derive(Debug, Default)]
pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn sample(&self, songs: &[Song], count: usize) -> Vec<Song> {
        let mut rng = rand::thread_rng();
        songs.choose_multiple(&mut rng, count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song {
                id: format!("s{i}"),
                artist: String::new(),
                song: String::new(),
                yt_id: String::new(),
                genres: vec![],
                score: None,
            })
            .collect()
    }

    #[test]
    fn samples_are_distinct_and_capped() {
        let pool = songs(30);
        let picked = RandomSampler.sample(&pool, 10);
        assert_eq!(picked.len(), 10);
        let ids: HashSet<_> = picked.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn small_pool_returns_everything() {
        let pool = songs(3);
        assert_eq!(RandomSampler.sample(&pool, 10).len(), 3);
    }
}
