//! Filesystem storage for uploads and rendered diagrams.
//!
//! Every generated pattern gets a random 16-digit hex id. The original
//! upload is kept as `{id}_original.png` and the rendered diagram as
//! `{id}_pattern.png`, both directly under the storage root. Ids double as
//! URL path segments, so everything read back is validated against the id
//! grammar first.

use std::path::{Path, PathBuf};

use rand::Rng;

/// Error type for pattern storage
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid storage name: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed pattern storage.
pub struct PatternStore {
    root: PathBuf,
}

const ID_LEN: usize = 16;

impl PatternStore {
    /// Open (and create if needed) the storage directory.
    pub fn new(root: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// A fresh random pattern id, 16 lowercase hex digits.
    pub fn new_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..ID_LEN)
            .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect()
    }

    /// Whether `id` is a well-formed pattern id.
    pub fn is_valid_id(id: &str) -> bool {
        id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
    }

    fn checked_path(&self, id: &str, suffix: &str) -> Result<PathBuf, StoreError> {
        if !Self::is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}_{suffix}.png")))
    }

    /// Persist the uploaded image bytes as received.
    pub fn save_original(&self, id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::write(self.checked_path(id, "original")?, bytes)?;
        Ok(())
    }

    /// Persist the rendered diagram PNG.
    pub fn save_diagram(&self, id: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::write(self.checked_path(id, "pattern")?, bytes)?;
        Ok(())
    }

    /// Whether a rendered diagram exists for `id`.
    pub fn has_diagram(&self, id: &str) -> bool {
        self.checked_path(id, "pattern")
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Read a stored file by its public name (`{id}_original.png` or
    /// `{id}_pattern.png`). Anything else is rejected before touching the
    /// filesystem.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let valid = name
            .strip_suffix("_original.png")
            .or_else(|| name.strip_suffix("_pattern.png"))
            .is_some_and(Self::is_valid_id);
        if !valid {
            return Err(StoreError::InvalidId(name.to_string()));
        }
        Ok(std::fs::read(self.root.join(name))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, PatternStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PatternStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_id_shape() {
        let (_dir, store) = store();
        for _ in 0..20 {
            let id = store.new_id();
            assert!(PatternStore::is_valid_id(&id), "bad id: {id}");
        }
    }

    #[test]
    fn test_save_and_read_back() {
        let (_dir, store) = store();
        let id = store.new_id();

        store.save_original(&id, b"orig").unwrap();
        store.save_diagram(&id, b"diagram").unwrap();

        assert!(store.has_diagram(&id));
        assert_eq!(store.read_file(&format!("{id}_original.png")).unwrap(), b"orig");
        assert_eq!(store.read_file(&format!("{id}_pattern.png")).unwrap(), b"diagram");
    }

    #[test]
    fn test_rejects_invalid_ids() {
        let (_dir, store) = store();

        assert!(matches!(
            store.save_original("short", b""),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.save_original("ABCDEF0123456789", b""),
            Err(StoreError::InvalidId(_))
        ));
        assert!(!store.has_diagram("../../etc/passwd"));
    }

    #[test]
    fn test_read_rejects_traversal_names() {
        let (_dir, store) = store();

        for name in [
            "../secret.png",
            "0123456789abcdef.png",
            "0123456789abcdef_other.png",
            "..%2f..%2fetc_pattern.png",
        ] {
            assert!(
                matches!(store.read_file(name), Err(StoreError::InvalidId(_))),
                "accepted {name}"
            );
        }
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let (_dir, store) = store();
        let id = store.new_id();
        assert!(matches!(
            store.read_file(&format!("{id}_pattern.png")),
            Err(StoreError::Io(_))
        ));
    }
}
