// Column layout state and its persistence

pub mod layout;

pub use layout::{
    ColumnLayout, FileBackend, LayoutBackend, LayoutError, MemoryBackend, DEFAULT_EXTRA_WIDTH,
    LAYOUT_KEY, MIN_COLUMN_WIDTH,
};
