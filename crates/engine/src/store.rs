//! Row storage: materialized rows plus a sliding window of placeholder slots.
//!
//! Display rows `[0, row_count)` are backed by real records; the next
//! `PLACEHOLDER_ROWS` slots are virtual and read as empty. Committing a
//! non-empty value into a placeholder slot materializes exactly one new row
//! (appended to the materialized block, shifting the placeholder window
//! down); empty commits never materialize anything.

use serde::{Deserialize, Serialize};

use crate::events::{CellChangedEvent, GridEvent, RowMaterializedEvent};
use crate::row::{Row, RowId};
use crate::schema::Schema;

/// Number of empty placeholder slots displayed past the materialized rows.
pub const PLACEHOLDER_ROWS: usize = 15;

/// Why a `set` was rejected. Defensive contract: the UI only ever offers
/// valid options and known columns, so neither arm is reachable through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// Value outside a single-select column's option set.
    InvalidEnumValue { key: String, value: String },
    /// No writable column with this key exists in the schema.
    UnknownColumn { key: String },
}

impl std::fmt::Display for SetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetError::InvalidEnumValue { key, value } => {
                write!(f, "value {:?} is not an option of column {:?}", value, key)
            }
            SetError::UnknownColumn { key } => {
                write!(f, "no writable column with key {:?}", key)
            }
        }
    }
}

/// What a successful `set` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// An existing row's field was updated.
    Updated,
    /// The value matched what was already stored; nothing was written.
    Unchanged,
    /// A placeholder slot was materialized into this new row.
    Materialized(RowId),
    /// Empty value into a placeholder slot; nothing to do.
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridStore {
    rows: Vec<Row>,
    /// Next id to assign to a materialized row. Monotonically increasing,
    /// never reused.
    next_row_id: u64,
    #[serde(skip)]
    events: Vec<GridEvent>,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_row_id: 1,
            events: Vec::new(),
        }
    }

    /// Build a store over pre-seeded rows. The id counter continues past the
    /// largest seeded id.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let next_row_id = rows.iter().map(|row| row.id().raw() + 1).max().unwrap_or(1);
        Self {
            rows,
            next_row_id,
            events: Vec::new(),
        }
    }

    /// Number of materialized rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of displayed rows: materialized plus the placeholder window.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + PLACEHOLDER_ROWS
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_by_id(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Resolved display value for `(row, key)`. Placeholder slots and absent
    /// fields read as empty string.
    pub fn get(&self, row: usize, key: &str) -> &str {
        self.rows.get(row).map(|r| r.get(key)).unwrap_or("")
    }

    /// Row-number gutter label for a display row: the row id for
    /// materialized rows, the 1-based slot number for placeholders.
    pub fn gutter_label(&self, row: usize) -> String {
        match self.rows.get(row) {
            Some(r) => r.id().to_string(),
            None => (row + 1).to_string(),
        }
    }

    /// Write `value` into `(row, key)`.
    ///
    /// Existing rows update in place; an identical value is reported as
    /// `Unchanged` with zero writes and zero events. A placeholder slot
    /// materializes on its first non-empty commit and ignores empty ones.
    pub fn set(
        &mut self,
        schema: &Schema,
        row: usize,
        key: &str,
        value: &str,
    ) -> Result<SetOutcome, SetError> {
        let column = match schema.column_by_key(key) {
            Some(column) if schema.is_data_key(key) => column,
            _ => return Err(SetError::UnknownColumn { key: key.into() }),
        };
        if !column.kind.accepts(value) {
            return Err(SetError::InvalidEnumValue {
                key: key.into(),
                value: value.into(),
            });
        }

        if let Some(existing) = self.rows.get_mut(row) {
            if existing.get(key) == value {
                return Ok(SetOutcome::Unchanged);
            }
            existing.set(key, value);
            let id = existing.id();
            self.events.push(GridEvent::CellChanged(CellChangedEvent {
                row: id,
                key: key.into(),
                value: value.into(),
            }));
            return Ok(SetOutcome::Updated);
        }

        // Placeholder slot: never materialize an empty row.
        if value.is_empty() {
            return Ok(SetOutcome::Ignored);
        }

        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        let mut new_row = Row::new(id);
        new_row.set(key, value);
        self.rows.push(new_row);

        self.events.push(GridEvent::RowMaterialized(RowMaterializedEvent {
            row: id,
            slot: row,
        }));
        self.events.push(GridEvent::CellChanged(CellChangedEvent {
            row: id,
            key: key.into(),
            value: value.into(),
        }));
        Ok(SetOutcome::Materialized(id))
    }

    /// Append an event from a collaborating component (schema growth).
    pub fn record(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    /// Take all buffered change events.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn schema() -> Schema {
        Schema::new(vec![
            Column::text("title", "Title"),
            Column::single_select("status", "Status", &["Open", "Done"]),
        ])
    }

    fn seeded() -> GridStore {
        GridStore::with_rows(vec![
            Row::new(RowId(1)).with("title", "first").with("status", "Open"),
            Row::new(RowId(2)).with("title", "second"),
        ])
    }

    #[test]
    fn test_get_reads_empty_for_placeholders_and_absent_fields() {
        let store = seeded();
        assert_eq!(store.get(0, "title"), "first");
        assert_eq!(store.get(1, "status"), "");
        assert_eq!(store.get(9, "title"), "");
        assert_eq!(store.total_rows(), 2 + PLACEHOLDER_ROWS);
    }

    #[test]
    fn test_update_in_place_emits_one_event() {
        let schema = schema();
        let mut store = seeded();

        let outcome = store.set(&schema, 0, "title", "renamed").unwrap();
        assert_eq!(outcome, SetOutcome::Updated);
        assert_eq!(store.get(0, "title"), "renamed");
        // Other rows untouched, identity preserved.
        assert_eq!(store.row(1).unwrap().id(), RowId(2));

        let events = store.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GridEvent::CellChanged(c) if c.row == RowId(1)));
    }

    #[test]
    fn test_unchanged_value_writes_nothing() {
        let schema = schema();
        let mut store = seeded();

        let outcome = store.set(&schema, 0, "title", "first").unwrap();
        assert_eq!(outcome, SetOutcome::Unchanged);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_materialize_placeholder_on_nonempty_commit() {
        let schema = schema();
        let mut store = seeded();

        let outcome = store.set(&schema, 5, "title", "fresh").unwrap();
        assert_eq!(outcome, SetOutcome::Materialized(RowId(3)));
        assert_eq!(store.row_count(), 3);
        // Appended to the materialized block; the window shifted down.
        assert_eq!(store.get(2, "title"), "fresh");
        assert_eq!(store.row(2).unwrap().field_count(), 1);
        assert_eq!(store.total_rows(), 3 + PLACEHOLDER_ROWS);

        let events = store.drain_events();
        assert!(matches!(&events[0], GridEvent::RowMaterialized(m) if m.slot == 5));
        assert!(matches!(&events[1], GridEvent::CellChanged(_)));
    }

    #[test]
    fn test_empty_commit_never_materializes() {
        let schema = schema();
        let mut store = seeded();

        let outcome = store.set(&schema, 7, "title", "").unwrap();
        assert_eq!(outcome, SetOutcome::Ignored);
        assert_eq!(store.row_count(), 2);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_out_of_order_materialization_keeps_ids_unique() {
        let schema = schema();
        let mut store = seeded();

        let far = store.set(&schema, 12, "title", "far").unwrap();
        let near = store.set(&schema, 8, "title", "near").unwrap();

        assert_eq!(far, SetOutcome::Materialized(RowId(3)));
        assert_eq!(near, SetOutcome::Materialized(RowId(4)));
        // Identity is independent of the clicked slot; both rows appended.
        assert_eq!(store.get(2, "title"), "far");
        assert_eq!(store.get(3, "title"), "near");
    }

    #[test]
    fn test_enum_value_outside_options_is_rejected() {
        let schema = schema();
        let mut store = seeded();

        let err = store.set(&schema, 0, "status", "Paused").unwrap_err();
        assert!(matches!(err, SetError::InvalidEnumValue { .. }));
        assert_eq!(store.get(0, "status"), "Open");
        assert!(store.drain_events().is_empty());

        // Blank clears an enum field.
        let outcome = store.set(&schema, 0, "status", "").unwrap();
        assert_eq!(outcome, SetOutcome::Updated);
        assert_eq!(store.get(0, "status"), "");
    }

    #[test]
    fn test_gutter_and_sentinel_keys_are_not_writable() {
        let schema = schema();
        let mut store = seeded();

        assert!(matches!(
            store.set(&schema, 0, "id", "9"),
            Err(SetError::UnknownColumn { .. })
        ));
        assert!(matches!(
            store.set(&schema, 0, "nope", "x"),
            Err(SetError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_gutter_label() {
        let store = seeded();
        assert_eq!(store.gutter_label(0), "1");
        assert_eq!(store.gutter_label(1), "2");
        assert_eq!(store.gutter_label(2), "3"); // placeholder: 1-based slot
        assert_eq!(store.gutter_label(10), "11");
    }
}
