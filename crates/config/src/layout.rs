//! Column width layout with durable persistence.
//!
//! Widths are a vector of pixels, one per column including the row-number
//! gutter and the add-column sentinel; the vector length always equals the
//! current column count. Widths persist through a small key-value backend as
//! a JSON array of integers. Layout is a convenience, not critical state:
//! persistence failures are logged and swallowed, and malformed persisted
//! data falls back to defaults. The in-memory vector stays authoritative for
//! the session either way.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Minimum width a column can be resized or loaded to.
pub const MIN_COLUMN_WIDTH: u32 = 40;

/// Width given to newly appended columns during reconciliation.
pub const DEFAULT_EXTRA_WIDTH: u32 = 120;

/// Key under which the width vector is persisted.
pub const LAYOUT_KEY: &str = "column-widths";

/// Durable key-value store for layout state. The backend holds opaque
/// strings; the layout layer owns the JSON format.
pub trait LayoutBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError>;
}

#[derive(Debug)]
pub enum LayoutError {
    /// Backend write failed (I/O, permissions).
    Backend(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::Backend(msg) => write!(f, "layout backend error: {}", msg),
        }
    }
}

/// File-backed store under the user config directory, one JSON file per key.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Store under `~/.config/gridlet/` (platform equivalent).
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridlet");
        Self { dir }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        fs::create_dir_all(&self.dir).map_err(|e| LayoutError::Backend(e.to_string()))?;
        fs::write(self.path(key), value).map_err(|e| LayoutError::Backend(e.to_string()))
    }
}

/// In-memory store for tests and embedders without a disk.
#[derive(Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    /// When set, every write fails; used to test the swallow policy.
    pub fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut backend = Self::default();
        backend.entries.insert(key.into(), value.into());
        backend
    }
}

impl LayoutBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        if self.fail_writes {
            return Err(LayoutError::Backend("simulated write failure".into()));
        }
        self.entries.insert(key.into(), value.into());
        Ok(())
    }
}

/// The width vector plus its persistence policy.
pub struct ColumnLayout {
    widths: Vec<u32>,
    backend: Box<dyn LayoutBackend>,
}

impl ColumnLayout {
    /// Load persisted widths, falling back to `defaults` when the entry is
    /// missing or unreadable. The result is clamped to the width floor and
    /// reconciled to `defaults.len()` columns.
    pub fn load(backend: Box<dyn LayoutBackend>, defaults: &[u32]) -> Self {
        let widths = match backend.get(LAYOUT_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(widths) => widths,
                Err(err) => {
                    log::warn!("discarding malformed column layout: {}", err);
                    defaults.to_vec()
                }
            },
            None => defaults.to_vec(),
        };

        let mut layout = Self { widths, backend };
        for width in &mut layout.widths {
            *width = (*width).max(MIN_COLUMN_WIDTH);
        }
        layout.reconcile(defaults.len());
        layout
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn width(&self, index: usize) -> u32 {
        self.widths.get(index).copied().unwrap_or(DEFAULT_EXTRA_WIDTH)
    }

    /// Reconcile the vector length with the column count: pad with the
    /// default width before the sentinel when short, drop entries ahead of
    /// the sentinel when long. The sentinel's width stays at the tail.
    pub fn reconcile(&mut self, desired_len: usize) {
        if self.widths.len() == desired_len || desired_len == 0 {
            return;
        }
        let sentinel = self.widths.pop().unwrap_or(DEFAULT_EXTRA_WIDTH);
        while self.widths.len() + 1 < desired_len {
            self.widths.push(DEFAULT_EXTRA_WIDTH);
        }
        self.widths.truncate(desired_len - 1);
        self.widths.push(sentinel);
    }

    /// Live update during a drag: clamped, not persisted.
    pub fn preview(&mut self, index: usize, new_width: u32) {
        if let Some(width) = self.widths.get_mut(index) {
            *width = new_width.max(MIN_COLUMN_WIDTH);
        }
    }

    /// Set column `index` to `new_width` (clamped to the floor) and persist.
    pub fn resize(&mut self, index: usize, new_width: u32) {
        if index >= self.widths.len() {
            return;
        }
        self.widths[index] = new_width.max(MIN_COLUMN_WIDTH);
        self.persist();
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.widths) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize column layout: {}", err);
                return;
            }
        };
        if let Err(err) = self.backend.set(LAYOUT_KEY, &json) {
            log::warn!("failed to persist column layout: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: [u32; 5] = [40, 300, 120, 100, 60];

    fn memory_layout() -> ColumnLayout {
        ColumnLayout::load(Box::new(MemoryBackend::new()), &DEFAULTS)
    }

    #[test]
    fn test_load_missing_entry_uses_defaults() {
        let layout = memory_layout();
        assert_eq!(layout.widths(), &DEFAULTS);
    }

    #[test]
    fn test_load_malformed_entry_uses_defaults() {
        let backend = MemoryBackend::with_entry(LAYOUT_KEY, "not json at all");
        let layout = ColumnLayout::load(Box::new(backend), &DEFAULTS);
        assert_eq!(layout.widths(), &DEFAULTS);
    }

    #[test]
    fn test_load_clamps_and_reconciles_persisted_vector() {
        // Shorter than the column count and below the floor.
        let backend = MemoryBackend::with_entry(LAYOUT_KEY, "[10, 200, 55]");
        let layout = ColumnLayout::load(Box::new(backend), &DEFAULTS);
        // Clamped to 40, padded before the sentinel (55 stays at the tail).
        assert_eq!(layout.widths(), &[40, 200, 120, 120, 55]);
    }

    #[test]
    fn test_reconcile_pads_before_sentinel() {
        let mut layout = memory_layout();
        layout.reconcile(8);
        assert_eq!(layout.widths(), &[40, 300, 120, 100, 120, 120, 120, 60]);
    }

    #[test]
    fn test_reconcile_truncates_preserving_sentinel() {
        let mut layout = memory_layout();
        layout.reconcile(3);
        assert_eq!(layout.widths(), &[40, 300, 60]);
    }

    #[test]
    fn test_resize_clamps_to_floor_and_persists() {
        let mut backend = MemoryBackend::new();
        backend
            .set(LAYOUT_KEY, "[40, 300, 120, 100, 60]")
            .unwrap();
        let mut layout = ColumnLayout::load(Box::new(backend), &DEFAULTS);

        layout.resize(1, 5);
        assert_eq!(layout.width(1), MIN_COLUMN_WIDTH);

        layout.resize(2, 250);
        assert_eq!(layout.width(2), 250);
    }

    #[test]
    fn test_resize_round_trips_through_backend() {
        let mut layout = memory_layout();
        layout.resize(1, 250);

        // Pull the persisted entry back out through the same layout's state.
        let json = serde_json::to_string(layout.widths()).unwrap();
        let reloaded = ColumnLayout::load(
            Box::new(MemoryBackend::with_entry(LAYOUT_KEY, &json)),
            &DEFAULTS,
        );
        assert_eq!(reloaded.widths(), layout.widths());
        assert_eq!(reloaded.width(1), 250);
    }

    #[test]
    fn test_failed_persist_keeps_memory_state() {
        let backend = MemoryBackend {
            fail_writes: true,
            ..MemoryBackend::new()
        };
        let mut layout = ColumnLayout::load(Box::new(backend), &DEFAULTS);

        layout.resize(1, 222);
        // Write failed, but the in-memory width is authoritative.
        assert_eq!(layout.width(1), 222);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::with_dir(dir.path());
        backend.set(LAYOUT_KEY, "[40, 120]").unwrap();

        let reloaded = FileBackend::with_dir(dir.path());
        assert_eq!(reloaded.get(LAYOUT_KEY).as_deref(), Some("[40, 120]"));
        assert_eq!(reloaded.get("unknown-key"), None);
    }

    #[test]
    fn test_file_backend_feeds_layout() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = Box::new(FileBackend::with_dir(dir.path()));
            let mut layout = ColumnLayout::load(backend, &DEFAULTS);
            layout.resize(3, 180);
        }
        let layout = ColumnLayout::load(Box::new(FileBackend::with_dir(dir.path())), &DEFAULTS);
        assert_eq!(layout.width(3), 180);
    }
}
