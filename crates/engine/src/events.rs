//! Event types for grid change notifications.
//!
//! Emitted by store and schema operations and drained by the embedder, so
//! the renderer can re-project without polling. Tests use them to verify
//! what a commit actually wrote.

use crate::row::RowId;

/// Events emitted by grid mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A cell value changed on a materialized row.
    CellChanged(CellChangedEvent),

    /// A placeholder slot became a real row.
    RowMaterialized(RowMaterializedEvent),

    /// Dynamic columns were appended before the sentinel.
    ColumnsAppended(ColumnsAppendedEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellChangedEvent {
    pub row: RowId,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowMaterializedEvent {
    pub row: RowId,
    /// Display slot the commit landed in when the row was created.
    pub slot: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnsAppendedEvent {
    pub keys: Vec<String>,
}

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GridEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only CellChanged events.
    pub fn cell_changed(&self) -> Vec<&CellChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::CellChanged(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Filter to only RowMaterialized events.
    pub fn row_materialized(&self) -> Vec<&RowMaterializedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::RowMaterialized(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Filter to only ColumnsAppended events.
    pub fn columns_appended(&self) -> Vec<&ColumnsAppendedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::ColumnsAppended(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}
