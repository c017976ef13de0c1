use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Bookmarked user IDs persisted between runs
///
/// The whole set lives in one JSON file and is rewritten in full on every
/// mutation. The write goes through a sibling temp file plus rename, so a
/// crash mid-save leaves the previous file intact.
#[derive(Debug)]
pub struct BookmarkStore {
    ids: BTreeSet<u64>,
    path: PathBuf,
}

impl BookmarkStore {
    /// Open the store at `path`, loading any existing set.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();

        let ids = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| {
                crate::Error::StoreError(format!("Failed to parse bookmark file: {}", e))
            })?
        } else {
            BTreeSet::new()
        };

        Ok(Self { ids, path })
    }

    /// Open the store at its default location.
    pub fn open_default() -> crate::Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// The bookmark file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn default_path() -> crate::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::StoreError("Could not find data directory".into()))?
            .join("soscout");

        Ok(data_dir.join("bookmarks.json"))
    }

    /// Insert an ID and persist. Returns false if it was already present.
    pub fn add(&mut self, user_id: u64) -> crate::Result<bool> {
        if !self.ids.insert(user_id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Remove an ID and persist. Returns false if it wasn't bookmarked.
    pub fn remove(&mut self, user_id: u64) -> crate::Result<bool> {
        if !self.ids.remove(&user_id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn contains(&self, user_id: u64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Bookmarked IDs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    /// Rewrite the file in full, replacing the old one atomically.
    fn save(&self) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.ids)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, contents)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
