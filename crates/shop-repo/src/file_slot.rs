use shop_types::ports::cart_store::{CartStore, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Cart slots kept as one JSON file per key inside a directory.
///
/// Calls are synchronous and run while the caller holds its cart lock. On a
/// multi-threaded tokio runtime the file I/O is moved off the worker with
/// `block_in_place`, so other tasks keep running; elsewhere it runs inline.
#[derive(Clone, Debug)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", escape_key(key)))
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(h) if h.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Maps a key to a single path component. Distinct keys give distinct names.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

impl CartStore for FileSlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        blocking(|| match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        })
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        blocking(|| self.write_slot(key, value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        blocking(|| match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        })
    }
}
