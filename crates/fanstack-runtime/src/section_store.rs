#![forbid(unsafe_code)]

//! Section-keyed JSON storage.
//!
//! Portfolio content is persisted as one JSON value per named section
//! (`"about"`, `"projects"`, ...). A [`SectionStore`] hides where those
//! values live:
//!
//! - [`MemoryStore`]: process-local, for tests and ephemeral sessions.
//! - [`FileStore`]: a single JSON document written with a temp-file + rename
//!   so a crash mid-write never leaves a truncated file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "sections": {
//!     "about": { "bio": ["..."] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error from a section store.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// A value could not be encoded or decoded.
    Serialization(String),
    /// Stored data is unreadable or a lock was poisoned.
    Corruption(String),
    /// The backend cannot be used.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Corruption(msg) => write!(f, "store corruption: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Storage for named JSON sections.
pub trait SectionStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Every stored section. Empty on first run.
    fn get_all(&self) -> StoreResult<BTreeMap<String, Value>>;

    /// One section, if stored.
    fn get(&self, section: &str) -> StoreResult<Option<Value>> {
        Ok(self.get_all()?.remove(section))
    }

    /// Insert or replace one section.
    fn save(&self, section: &str, value: &Value) -> StoreResult<()>;

    /// Delete one section. Returns `true` if it existed.
    fn remove(&self, section: &str) -> StoreResult<bool>;

    /// Delete everything.
    fn clear(&self) -> StoreResult<()>;

    /// Whether the backend is usable.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: SectionStore + ?Sized> SectionStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        (**self).get_all()
    }

    fn get(&self, section: &str) -> StoreResult<Option<Value>> {
        (**self).get(section)
    }

    fn save(&self, section: &str, value: &Value) -> StoreResult<()> {
        (**self).save(section, value)
    }

    fn remove(&self, section: &str) -> StoreResult<bool> {
        (**self).remove(section)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

fn poisoned() -> StoreError {
    StoreError::Corruption("lock poisoned".into())
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory section store. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with sections.
    #[must_use]
    pub fn with_sections(sections: BTreeMap<String, Value>) -> Self {
        Self {
            data: RwLock::new(sections),
        }
    }
}

impl SectionStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        Ok(self.data.read().map_err(|_| poisoned())?.clone())
    }

    fn get(&self, section: &str) -> StoreResult<Option<Value>> {
        Ok(self.data.read().map_err(|_| poisoned())?.get(section).cloned())
    }

    fn save(&self, section: &str, value: &Value) -> StoreResult<()> {
        self.data
            .write()
            .map_err(|_| poisoned())?
            .insert(section.to_owned(), value.clone());
        Ok(())
    }

    fn remove(&self, section: &str) -> StoreResult<bool> {
        Ok(self
            .data
            .write()
            .map_err(|_| poisoned())?
            .remove(section)
            .is_some())
    }

    fn clear(&self) -> StoreResult<()> {
        self.data.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStore")
            .field("sections", &count)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct StoreFile {
    format_version: u32,
    sections: BTreeMap<String, Value>,
}

impl StoreFile {
    const FORMAT_VERSION: u32 = 1;
}

/// Section store backed by one JSON file.
///
/// Writes go to `{path}.tmp`, are flushed and synced, then renamed over
/// `{path}`. Read-modify-write cycles are serialized within the process.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store at the default location for `app_name`:
    /// `$XDG_STATE_HOME/{app_name}/sections.json`, else
    /// `~/.local/state/{app_name}/sections.json`.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        Self::new(state_dir().join(app_name).join("sections.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn read(&self) -> StoreResult<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let file: StoreFile = serde_json::from_reader(reader).map_err(|e| {
            StoreError::Corruption(format!("failed to parse {}: {e}", self.path.display()))
        })?;

        if file.format_version != StoreFile::FORMAT_VERSION {
            tracing::warn!(
                stored = file.format_version,
                expected = StoreFile::FORMAT_VERSION,
                path = %self.path.display(),
                "section file format version mismatch, ignoring stored sections"
            );
            return Ok(BTreeMap::new());
        }
        Ok(file.sections)
    }

    fn write(&self, sections: BTreeMap<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let count = sections.len();
        let file = StoreFile {
            format_version: StoreFile::FORMAT_VERSION,
            sections,
        };

        let tmp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &file).map_err(|e| {
                StoreError::Serialization(format!("failed to serialize sections: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), sections = count, "saved sections");
        Ok(())
    }
}

fn state_dir() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl SectionStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn get_all(&self) -> StoreResult<BTreeMap<String, Value>> {
        self.read()
    }

    fn save(&self, section: &str, value: &Value) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut sections = self.read()?;
        sections.insert(section.to_owned(), value.clone());
        self.write(sections)
    }

    fn remove(&self, section: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut sections = self.read()?;
        if sections.remove(section).is_none() {
            return Ok(false);
        }
        self.write(sections)?;
        Ok(true)
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if !parent.exists() {
            return fs::create_dir_all(parent).is_ok();
        }
        let probe = parent.join(".fanstack_write_probe");
        if fs::write(&probe, b"probe").is_ok() {
            let _ = fs::remove_file(&probe);
            return true;
        }
        false
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}
