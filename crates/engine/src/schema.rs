//! Column schema for the grid.
//!
//! The column list is insertion-ordered: index 0 is the row-number gutter,
//! the last index is the add-column sentinel, and everything between is an
//! addressable data column. Dynamic columns are appended before the sentinel
//! with generated keys that never collide with fixed or earlier generated
//! keys. There is no column removal.

use serde::{Deserialize, Serialize};

/// Reserved key of the row-number gutter column.
pub const GUTTER_KEY: &str = "id";

/// Reserved key of the add-column sentinel.
pub const SENTINEL_KEY: &str = "add";

/// What kind of control edits a column's cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Free text, edited inline.
    Text,
    /// Closed, ordered set of allowed values, edited via a dropdown.
    SingleSelect(Vec<String>),
}

impl ColumnKind {
    pub fn is_select(&self) -> bool {
        matches!(self, ColumnKind::SingleSelect(_))
    }

    /// Option list for a single-select column (empty for text columns).
    pub fn options(&self) -> &[String] {
        match self {
            ColumnKind::SingleSelect(options) => options,
            ColumnKind::Text => &[],
        }
    }

    /// True when `value` is allowed for this column. Blank is always allowed
    /// (an unset cell); list matching is case-sensitive.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ColumnKind::Text => true,
            ColumnKind::SingleSelect(options) => {
                value.is_empty() || options.iter().any(|option| option == value)
            }
        }
    }
}

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Stable unique key. Survives reordering; never reused.
    pub key: String,
    /// Header label shown to the user.
    pub label: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn single_select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: &[&str],
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: ColumnKind::SingleSelect(options.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// Ordered column registry: gutter + data columns + add-column sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
    /// Count of dynamically appended columns. Drives `extra_{n}` keys and
    /// `New Col {n}` labels; monotonic, never reused.
    extra_count: usize,
}

impl Schema {
    /// Build a schema from the fixed data columns. The gutter and sentinel
    /// are added around them.
    pub fn new(data_columns: Vec<Column>) -> Self {
        debug_assert!(
            {
                let mut keys: Vec<&str> = data_columns.iter().map(|c| c.key.as_str()).collect();
                keys.sort_unstable();
                keys.windows(2).all(|w| w[0] != w[1])
                    && !keys.contains(&GUTTER_KEY)
                    && !keys.contains(&SENTINEL_KEY)
            },
            "column keys must be unique and not reserved"
        );

        let mut columns = Vec::with_capacity(data_columns.len() + 2);
        columns.push(Column::text(GUTTER_KEY, "#"));
        columns.extend(data_columns);
        columns.push(Column::text(SENTINEL_KEY, "+"));
        Self {
            columns,
            extra_count: 0,
        }
    }

    /// Total column count, including the gutter and the sentinel.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_by_key(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Display index of the add-column sentinel.
    pub fn sentinel_index(&self) -> usize {
        self.columns.len() - 1
    }

    /// Display index of the last addressable data column.
    pub fn last_data_col(&self) -> usize {
        self.columns.len() - 2
    }

    /// True for addressable data columns (not the gutter, not the sentinel).
    pub fn is_data_col(&self, index: usize) -> bool {
        index >= 1 && index <= self.last_data_col()
    }

    /// Key of the data column at display `index`, or `None` for the gutter
    /// and the sentinel.
    pub fn data_key(&self, index: usize) -> Option<&str> {
        if self.is_data_col(index) {
            self.columns.get(index).map(|column| column.key.as_str())
        } else {
            None
        }
    }

    /// True when `key` names a writable data column.
    pub fn is_data_key(&self, key: &str) -> bool {
        key != GUTTER_KEY && key != SENTINEL_KEY && self.column_by_key(key).is_some()
    }

    /// Append `n` fresh columns before the sentinel and return their keys.
    ///
    /// Keys follow `extra_{n}` and labels `New Col {n}`, with `n` continuing
    /// the running count across calls.
    pub fn append_columns(&mut self, n: usize) -> Vec<String> {
        let mut keys = Vec::with_capacity(n);
        for _ in 0..n {
            self.extra_count += 1;
            let mut key = format!("extra_{}", self.extra_count);
            // Fixed columns could shadow a generated key; skip past them.
            while self.column_by_key(&key).is_some() {
                self.extra_count += 1;
                key = format!("extra_{}", self.extra_count);
            }
            let label = format!("New Col {}", self.extra_count);
            let at = self.sentinel_index();
            self.columns.insert(at, Column::text(key.clone(), label));
            keys.push(key);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_column_schema() -> Schema {
        Schema::new(vec![
            Column::text("title", "Title"),
            Column::single_select("status", "Status", &["Open", "Done"]),
            Column::text("notes", "Notes"),
        ])
    }

    #[test]
    fn test_layout_indices() {
        let schema = three_column_schema();
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.sentinel_index(), 4);
        assert_eq!(schema.last_data_col(), 3);
        assert!(!schema.is_data_col(0));
        assert!(schema.is_data_col(1));
        assert!(schema.is_data_col(3));
        assert!(!schema.is_data_col(4));
    }

    #[test]
    fn test_data_key_excludes_gutter_and_sentinel() {
        let schema = three_column_schema();
        assert_eq!(schema.data_key(0), None);
        assert_eq!(schema.data_key(1), Some("title"));
        assert_eq!(schema.data_key(4), None);
        assert!(!schema.is_data_key(GUTTER_KEY));
        assert!(!schema.is_data_key(SENTINEL_KEY));
        assert!(schema.is_data_key("status"));
    }

    #[test]
    fn test_append_columns_generates_fresh_keys_and_labels() {
        let mut schema = three_column_schema();
        let keys = schema.append_columns(5);

        assert_eq!(keys, vec!["extra_1", "extra_2", "extra_3", "extra_4", "extra_5"]);
        assert_eq!(schema.len(), 10);
        assert_eq!(schema.column(4).unwrap().label, "New Col 1");
        assert_eq!(schema.column(9).unwrap().key, SENTINEL_KEY);

        // Labels continue the running count on the next click.
        let more = schema.append_columns(2);
        assert_eq!(more, vec!["extra_6", "extra_7"]);
        assert_eq!(schema.column(10).unwrap().label, "New Col 7");
        assert_eq!(schema.column(11).unwrap().key, SENTINEL_KEY);
    }

    #[test]
    fn test_append_columns_skips_colliding_fixed_keys() {
        let mut schema = Schema::new(vec![
            Column::text("extra_1", "Pre-existing"),
            Column::text("title", "Title"),
        ]);
        let keys = schema.append_columns(2);
        assert_eq!(keys, vec!["extra_2", "extra_3"]);
    }

    #[test]
    fn test_single_select_accepts_only_listed_values_or_blank() {
        let kind = ColumnKind::SingleSelect(vec!["Low".into(), "High".into()]);
        assert!(kind.accepts("Low"));
        assert!(kind.accepts(""));
        assert!(!kind.accepts("low"));
        assert!(!kind.accepts("Medium"));
        assert!(ColumnKind::Text.accepts("anything"));
    }
}
