//! Favorites store
//!
//! Favorites live in `quicklang/config.json` under the data directory:
//!
//! ```text
//! {
//!   "favorites": [4,1,18]
//! }
//! ```
//!
//! The file is never run through a JSON parser. Loading scans for the
//! `"favorites":` key and reads the integer list that follows, ignoring
//! everything else, and any failure on the way yields an empty list. Saving
//! always rewrites the whole file in the shape above.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use tracing::{debug, warn};

/// Maximum number of favorites kept
pub const MAX_FAVORITES: usize = 32;

/// Directory (under the data dir) holding the favorites file
pub const CONFIG_DIR: &str = "quicklang";

pub const CONFIG_FILE: &str = "config.json";

/// Bytes read from the favorites file; the rest is ignored
const READ_LIMIT: u64 = 1023;

const FAVORITES_KEY: &str = "\"favorites\":";

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The id was absent and the list is full
    Unchanged,
}

/// Favorited language ids in insertion order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: SmallVec<[i32; MAX_FAVORITES]>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_FAVORITES
    }

    pub fn contains(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.ids
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i32> + '_ {
        self.ids.iter().copied()
    }

    pub fn first(&self) -> Option<i32> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<i32> {
        self.ids.last().copied()
    }

    /// Remove `id` if present, otherwise append it if there is room.
    pub fn toggle(&mut self, id: i32) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|&fav| fav == id) {
            self.ids.remove(pos);
            Toggle::Removed
        } else if self.is_full() {
            Toggle::Unchanged
        } else {
            self.ids.push(id);
            Toggle::Added
        }
    }

    /// Best-effort parse of the persisted fragment. Never fails; anything
    /// unreadable produces an empty or truncated list.
    pub fn parse(text: &str) -> Self {
        let mut favorites = Self::new();

        let Some(key) = text.find(FAVORITES_KEY) else {
            return favorites;
        };
        let rest = &text[key + FAVORITES_KEY.len()..];
        let Some(open) = rest.find('[') else {
            return favorites;
        };
        let mut cursor = &rest[open + 1..];

        while !favorites.is_full() {
            if let Some((id, after)) = take_int(cursor) {
                if !favorites.contains(id) {
                    favorites.ids.push(id);
                }
                cursor = after;
            }
            match cursor.trim_start().strip_prefix(',') {
                Some(after) => cursor = after,
                None => break,
            }
        }

        favorites
    }

    /// Serialize in the on-disk shape
    pub fn render(&self) -> String {
        let ids: Vec<String> = self.ids.iter().map(|id| id.to_string()).collect();
        format!("{{\n  \"favorites\": [{}]\n}}\n", ids.join(","))
    }
}

impl FromIterator<i32> for Favorites {
    /// Builds a list the way repeated toggles on an empty list would,
    /// minus removals: duplicates and ids past capacity are dropped.
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut favorites = Self::new();
        for id in iter {
            if !favorites.contains(id) && !favorites.is_full() {
                favorites.ids.push(id);
            }
        }
        favorites
    }
}

/// Read an optionally signed decimal integer after leading whitespace.
fn take_int(input: &str) -> Option<(i32, &str)> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let end = sign + digits;
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// File-backed favorites persistence
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    /// Store at `<data_dir>/quicklang/config.json`
    pub fn new(data_dir: &Path) -> Self {
        Self::at(data_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load favorites; a missing or unreadable file is an empty list.
    pub fn load(&self) -> Favorites {
        match self.read() {
            Ok(text) => {
                let favorites = Favorites::parse(&text);
                debug!("Loaded {} favorites from {}", favorites.len(), self.path.display());
                favorites
            }
            Err(e) => {
                debug!("No favorites loaded from {}: {}", self.path.display(), e);
                Favorites::new()
            }
        }
    }

    fn read(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        File::open(&self.path)?.take(READ_LIMIT).read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Overwrite the file with `favorites`. Failures are logged, not returned.
    pub fn save(&self, favorites: &Favorites) {
        if let Err(e) = self.write(favorites) {
            warn!("Failed to save favorites to {}: {}", self.path.display(), e);
        }
    }

    fn write(&self, favorites: &Favorites) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, favorites.render())
    }

    /// Toggle `id` and persist the result.
    pub fn toggle(&self, favorites: &mut Favorites, id: i32) -> Toggle {
        let outcome = favorites.toggle(id);
        debug!("Toggled favorite {}: {:?}", id, outcome);
        self.save(favorites);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full() -> Favorites {
        (0..MAX_FAVORITES as i32).collect()
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let original: Favorites = [4, 1].into_iter().collect();
        let mut favorites = original.clone();

        assert_eq!(favorites.toggle(18), Toggle::Added);
        assert_eq!(favorites.as_slice(), &[4, 1, 18]);

        assert_eq!(favorites.toggle(18), Toggle::Removed);
        assert_eq!(favorites, original);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut favorites: Favorites = [5, 2, 9, 7].into_iter().collect();
        favorites.toggle(2);
        assert_eq!(favorites.as_slice(), &[5, 9, 7]);
    }

    #[test]
    fn test_toggle_at_capacity_is_noop() {
        let mut favorites = full();
        assert!(favorites.is_full());

        assert_eq!(favorites.toggle(100), Toggle::Unchanged);
        assert_eq!(favorites, full());

        // Removing still works when full
        assert_eq!(favorites.toggle(3), Toggle::Removed);
        assert_eq!(favorites.len(), MAX_FAVORITES - 1);
    }

    #[test]
    fn test_render_shape() {
        let favorites: Favorites = [4, 1, 18].into_iter().collect();
        assert_eq!(favorites.render(), "{\n  \"favorites\": [4,1,18]\n}\n");
        assert_eq!(Favorites::new().render(), "{\n  \"favorites\": []\n}\n");
    }

    #[test]
    fn test_parse_compact_and_pretty() {
        let compact = Favorites::parse(r#"{"favorites":[5,2,9]}"#);
        assert_eq!(compact.as_slice(), &[5, 2, 9]);

        let pretty = Favorites::parse("{\n  \"favorites\": [ 5, 2 ,9 ]\n}\n");
        assert_eq!(pretty.as_slice(), &[5, 2, 9]);
    }

    #[test]
    fn test_parse_ignores_other_content() {
        let text = r#"{"theme":"dark","favorites":[3,-1],"extra":[7,8]}"#;
        assert_eq!(Favorites::parse(text).as_slice(), &[3, -1]);
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        for text in ["", "garbage", "{\"favorites\":", "{\"favorites\": 3}", "[1,2,3]"] {
            assert!(Favorites::parse(text).is_empty(), "{:?}", text);
        }
    }

    #[test]
    fn test_parse_stops_at_non_numeric() {
        assert_eq!(Favorites::parse(r#"{"favorites":[1,2,x,4]}"#).as_slice(), &[1, 2]);
        assert_eq!(Favorites::parse(r#"{"favorites":[1,2"#).as_slice(), &[1, 2]);
        assert_eq!(Favorites::parse(r#"{"favorites":[1,99999999999,3]}"#).as_slice(), &[1]);
    }

    #[test]
    fn test_parse_caps_at_capacity() {
        let ids: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        let text = format!("{{\"favorites\":[{}]}}", ids.join(","));
        assert_eq!(Favorites::parse(&text), full());
    }

    #[test]
    fn test_parse_drops_duplicates() {
        assert_eq!(Favorites::parse(r#"{"favorites":[4,1,4]}"#).as_slice(), &[4, 1]);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::new(dir.path());
        let favorites: Favorites = [9, 2, 5, 42].into_iter().collect();

        store.save(&favorites);

        assert!(store.path().ends_with("quicklang/config.json"));
        assert_eq!(store.load(), favorites);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::new(dir.path());

        store.save(&[1, 2, 3, 4, 5, 6].into_iter().collect());
        store.save(&[7].into_iter().collect());

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "{\n  \"favorites\": [7]\n}\n");
    }

    #[test]
    fn test_load_missing_or_garbage_file() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::new(dir.path());
        assert!(store.load().is_empty());

        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), [0xff, 0xfe, 0x00, b'{']).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_only_reads_prefix() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::at(dir.path().join("config.json"));

        let padding = " ".repeat(READ_LIMIT as usize);
        std::fs::write(store.path(), format!("{}{{\"favorites\":[1]}}", padding)).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // Parent "directory" is a regular file, so create_dir_all fails
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = FavoritesStore::at(blocker.join("config.json"));

        let mut favorites = Favorites::new();
        assert_eq!(store.toggle(&mut favorites, 4), Toggle::Added);
        assert_eq!(favorites.as_slice(), &[4]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_store_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::new(dir.path());
        let mut favorites = store.load();

        store.toggle(&mut favorites, 4);
        store.toggle(&mut favorites, 1);
        assert_eq!(store.load().as_slice(), &[4, 1]);

        store.toggle(&mut favorites, 4);
        assert_eq!(store.load().as_slice(), &[1]);
    }
}
