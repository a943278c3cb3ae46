use crate::Song;
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The loaded song catalog. Keeps the file's order and an id index for
/// exact-match lookup.
#[derive(Debug)]
pub struct Catalog {
    songs: Vec<Song>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-parsed records. Ids must be unique.
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(songs.len());
        for (i, song) in songs.iter().enumerate() {
            if by_id.insert(song.id.clone(), i).is_some() {
                bail!("duplicate song id `{}` in metadata", song.id);
            }
        }
        Ok(Self { songs, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.by_id.get(id).map(|&i| &self.songs[i])
    }

    /// All songs, in file order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Load the catalog from a `songMeta.json` file (a JSON array of songs).
/// Any failure is fatal: without the catalog no page can be served.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading song metadata {}", path.display()))?;
    let songs: Vec<Song> = serde_json::from_str(&content)
        .with_context(|| format!("parsing song metadata {}", path.display()))?;
    Catalog::new(songs)
}
