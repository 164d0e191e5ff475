//! The seeded task sheet: fixed columns, enumeration options, sample rows,
//! and default widths for the initial product surface.

use crate::row::{Row, RowId};
use crate::schema::{Column, Schema};
use crate::store::GridStore;

/// Allowed values for the Status column, in cycle order.
pub const STATUS_OPTIONS: [&str; 4] = ["In-process", "Need to start", "Complete", "Blocked"];

/// Allowed values for the Priority column, in cycle order.
pub const PRIORITY_OPTIONS: [&str; 3] = ["Low", "Medium", "High"];

/// Default pixel widths, one per column including gutter and sentinel.
pub const DEFAULT_WIDTHS: [u32; 11] = [40, 300, 120, 120, 120, 140, 120, 100, 120, 120, 60];

/// The fixed task-sheet columns (gutter and sentinel added by `Schema::new`).
pub fn task_sheet_schema() -> Schema {
    Schema::new(vec![
        Column::text("title", "Job Request"),
        Column::text("due_date", "Submitted"),
        Column::single_select("status", "Status", &STATUS_OPTIONS),
        Column::text("submitter", "Submitter"),
        Column::text("url", "URL"),
        Column::text("assignee", "Assigned"),
        Column::single_select("priority", "Priority", &PRIORITY_OPTIONS),
        Column::text("due_date2", "Due Date"),
        Column::text("estimated_value", "Est. Value"),
    ])
}

/// Sample rows shipped with a fresh sheet.
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new(RowId(1))
            .with("title", "Launch social media campaign for product release")
            .with("due_date", "15-11-2024")
            .with("status", "In-process")
            .with("submitter", "Aisha Patel")
            .with("url", "www.alishapatel.com")
            .with("assignee", "Sophie Choudhury")
            .with("priority", "Medium")
            .with("due_date2", "20-11-2024")
            .with("estimated_value", "6,200,000"),
        Row::new(RowId(2))
            .with("title", "Update press kit for company redesign")
            .with("due_date", "28-10-2024")
            .with("status", "Need to start")
            .with("submitter", "Irfan Khan")
            .with("url", "www.irfankhan.com")
            .with("assignee", "Tejus Pandey")
            .with("priority", "High")
            .with("due_date2", "30-10-2024")
            .with("estimated_value", "3,500,000"),
        Row::new(RowId(3))
            .with("title", "Finalize user testing feedback for app update")
            .with("due_date", "05-12-2024")
            .with("status", "In-process")
            .with("submitter", "Mark Johnson")
            .with("url", "www.markjohnson.com")
            .with("assignee", "Rachel Lee")
            .with("priority", "Medium")
            .with("due_date2", "10-12-2024")
            .with("estimated_value", "4,750,000"),
        Row::new(RowId(4))
            .with("title", "Design new features for the website")
            .with("due_date", "10-01-2025")
            .with("status", "Complete")
            .with("submitter", "Emily Green")
            .with("url", "www.emilygreen.com")
            .with("assignee", "Tom Wright")
            .with("priority", "Low")
            .with("due_date2", "15-01-2025")
            .with("estimated_value", "5,800,000"),
        Row::new(RowId(5))
            .with("title", "Prepare financial report for Q4")
            .with("due_date", "25-01-2025")
            .with("status", "Blocked")
            .with("submitter", "Jessica Brown")
            .with("url", "www.jessicabrown.com")
            .with("assignee", "Kevin Smith")
            .with("priority", "Low")
            .with("due_date2", "30-01-2025")
            .with("estimated_value", "2,800,000"),
    ]
}

/// A store seeded with the sample rows.
pub fn task_sheet_store() -> GridStore {
    GridStore::with_rows(sample_rows())
}
