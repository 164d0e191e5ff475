//! The grid widget facade.
//!
//! Composes the schema, store, layout, cursor, editor, dropdown, and resize
//! controller into the surface an external renderer drives: pointer and
//! keyboard handlers in, resolved display state out. The renderer owns
//! nothing here; it re-projects from this state after every call and drains
//! focus requests and change events.
//!
//! Key routing precedence: a live resize drag owns all input, then an open
//! dropdown, then the edit session, then grid navigation.

use gridlet_config::{ColumnLayout, LayoutBackend};
use gridlet_core::{CellAddress, Cursor, Direction, GridBounds, GUTTER_COL};
use gridlet_engine::events::{ColumnsAppendedEvent, GridEvent};
use gridlet_engine::schema::{ColumnKind, Schema};
use gridlet_engine::seed;
use gridlet_engine::store::GridStore;

use crate::dropdown::{DropdownOutcome, OptionDropdown};
use crate::editor::{EditOutcome, EditSession};
use crate::mode::{KeyModifiers, Mode};
use crate::resize::{PointerCapture, ResizeDrag};

/// Number of columns appended per add-column click.
pub const ADD_COLUMN_BATCH: usize = 5;

/// How a text edit session starts.
enum EditStart {
    /// Buffer begins as the committed value, caret at end (Enter/F2/click).
    Preserve,
    /// Buffer begins empty (type-to-replace).
    Clear,
}

pub struct SheetGrid {
    schema: Schema,
    store: GridStore,
    layout: ColumnLayout,
    cursor: Cursor,
    mode: Mode,
    editor: Option<EditSession>,
    dropdown: OptionDropdown,
    resize: ResizeDrag,
    capture: PointerCapture,
    /// Cell the renderer should move keyboard focus to, set on navigation.
    pending_focus: Option<CellAddress>,
}

impl SheetGrid {
    pub fn new(
        schema: Schema,
        store: GridStore,
        backend: Box<dyn LayoutBackend>,
        default_widths: &[u32],
    ) -> Self {
        let mut layout = ColumnLayout::load(backend, default_widths);
        layout.reconcile(schema.len());
        Self {
            schema,
            store,
            layout,
            cursor: Cursor::Idle,
            mode: Mode::Navigation,
            editor: None,
            dropdown: OptionDropdown::Closed,
            resize: ResizeDrag::Idle,
            capture: PointerCapture::new(),
            pending_focus: None,
        }
    }

    /// The seeded task sheet over the given layout backend.
    pub fn task_sheet(backend: Box<dyn LayoutBackend>) -> Self {
        Self::new(
            seed::task_sheet_schema(),
            seed::task_sheet_store(),
            backend,
            &seed::DEFAULT_WIDTHS,
        )
    }

    fn bounds(&self) -> GridBounds {
        GridBounds::new(self.store.total_rows(), self.schema.last_data_col())
    }

    // =========================================================================
    // Renderer read surface
    // =========================================================================

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn widths(&self) -> &[u32] {
        self.layout.widths()
    }

    pub fn total_rows(&self) -> usize {
        self.store.total_rows()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_cell(&self) -> Option<CellAddress> {
        self.cursor.address()
    }

    pub fn is_active(&self, addr: CellAddress) -> bool {
        self.cursor.is_at(addr)
    }

    pub fn is_editing(&self, addr: CellAddress) -> bool {
        self.editor
            .as_ref()
            .map(|session| session.address() == addr)
            .unwrap_or(false)
    }

    /// Live buffer of the cell being edited, if any.
    pub fn edit_buffer(&self) -> Option<&str> {
        self.editor.as_ref().map(|session| session.buffer())
    }

    pub fn dropdown(&self) -> &OptionDropdown {
        &self.dropdown
    }

    /// Resolved display value for `(row, col)`: the gutter label, a data
    /// cell's committed value, or empty for the sentinel.
    pub fn display_value(&self, row: usize, col: usize) -> String {
        if col == GUTTER_COL {
            return self.store.gutter_label(row);
        }
        match self.schema.data_key(col) {
            Some(key) => self.store.get(row, key).to_string(),
            None => String::new(),
        }
    }

    /// Cell the renderer should transfer keyboard focus to.
    pub fn take_focus_request(&mut self) -> Option<CellAddress> {
        self.pending_focus.take()
    }

    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.store.drain_events()
    }

    /// While true, route all pointer input to `resize_move`/`end_resize`.
    pub fn is_pointer_captured(&self) -> bool {
        self.capture.is_held()
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Click on a body cell. The first click activates it; a second click on
    /// the active cell starts editing (text) or toggles the popover
    /// (single-select).
    pub fn on_cell_click(&mut self, addr: CellAddress) {
        if self.resize.is_dragging() {
            return;
        }
        let bounds = self.bounds();
        if !self.schema.is_data_col(addr.col) || addr.row >= bounds.total_rows {
            return;
        }

        // A click outside an open popover dismisses it, value unchanged.
        if self.dropdown.is_open() && !self.dropdown.is_open_at(addr) {
            self.dropdown.close();
        }

        if !self.cursor.is_at(addr) {
            // Exactly one edit session may exist: settle the old one first.
            self.commit_edit();
            self.cursor.click(addr, bounds);
            return;
        }

        if self.is_editing(addr) {
            return;
        }
        self.begin_edit_at(addr, EditStart::Preserve);
    }

    /// Click on an option row of the open popover: write-through and close.
    pub fn on_option_click(&mut self, index: usize) {
        let selected = self
            .dropdown
            .as_open_mut()
            .and_then(|open| open.select(index).map(|value| (open.address, value)));
        if let Some((addr, value)) = selected {
            self.write_cell(addr, &value);
            self.dropdown.close();
        }
    }

    /// Click on the add-column sentinel header.
    pub fn on_add_column_click(&mut self) {
        if self.resize.is_dragging() {
            return;
        }
        self.dropdown.close();
        self.commit_edit();

        let keys = self.schema.append_columns(ADD_COLUMN_BATCH);
        self.layout.reconcile(self.schema.len());
        self.store
            .record(GridEvent::ColumnsAppended(ColumnsAppendedEvent { keys }));
    }

    /// Click anywhere outside the grid: dismiss the popover, settle the edit.
    /// The active cell is left as is.
    pub fn on_outside_click(&mut self) {
        self.dropdown.close();
        self.commit_edit();
    }

    /// Focus left the editing cell.
    pub fn on_blur(&mut self) {
        self.commit_edit();
    }

    // =========================================================================
    // Keyboard input
    // =========================================================================

    /// Route one keystroke. Returns true when the grid consumed it.
    /// Printable characters go through `on_char`.
    pub fn on_key(&mut self, key: &str, modifiers: KeyModifiers) -> bool {
        // A live resize owns all input; Escape aborts it.
        if self.resize.is_dragging() {
            if key == "escape" {
                self.cancel_resize();
            }
            return true;
        }

        // Dropdown intercepts keystrokes before they reach the grid.
        if self.dropdown.is_open() {
            let routed = self
                .dropdown
                .as_open_mut()
                .map(|open| (open.address, open.handle_key(key, modifiers)));
            if let Some((addr, outcome)) = routed {
                match outcome {
                    DropdownOutcome::Consumed => return true,
                    DropdownOutcome::CommitValue(value) => {
                        self.write_cell(addr, &value);
                        return true;
                    }
                    DropdownOutcome::CloseNoCommit => {
                        self.dropdown.close();
                        return true;
                    }
                    DropdownOutcome::NotConsumed => {}
                }
            }
        }

        // Then the edit session.
        if self.editor.is_some() {
            let outcome = self
                .editor
                .as_mut()
                .map(|session| session.handle_key(key, modifiers))
                .unwrap_or(EditOutcome::NotConsumed);
            match outcome {
                EditOutcome::Consumed => return true,
                EditOutcome::Commit { advance } => {
                    self.commit_edit();
                    if let Some(direction) = advance {
                        self.navigate(direction);
                    }
                    return true;
                }
                EditOutcome::Cancel => {
                    self.cancel_edit();
                    return true;
                }
                EditOutcome::NotConsumed => {}
            }
        }

        // Grid navigation.
        if modifiers.any_command() {
            return false;
        }
        match key {
            "up" => {
                self.navigate(Direction::Up);
                true
            }
            "down" => {
                self.navigate(Direction::Down);
                true
            }
            "left" => {
                self.navigate(Direction::Left);
                true
            }
            "right" => {
                self.navigate(Direction::Right);
                true
            }
            "enter" | "f2" => match self.cursor.address() {
                Some(addr) => {
                    self.begin_edit_at(addr, EditStart::Preserve);
                    true
                }
                None => false,
            },
            "space" => match self.cursor.address() {
                // Space opens the popover on a single-select cell.
                Some(addr) if self.is_select_col(addr.col) => {
                    self.begin_edit_at(addr, EditStart::Preserve);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Printable character input. While editing it goes into the buffer;
    /// on an active text cell it starts a fresh edit (type-to-replace).
    pub fn on_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if let Some(session) = self.editor.as_mut() {
            session.insert_char(ch);
            return;
        }
        if self.dropdown.is_open() {
            return;
        }
        if let Some(addr) = self.cursor.address() {
            if self.is_text_col(addr.col) {
                self.begin_edit_at(addr, EditStart::Clear);
                if let Some(session) = self.editor.as_mut() {
                    session.insert_char(ch);
                }
            }
        }
    }

    // =========================================================================
    // Resize gesture
    // =========================================================================

    /// Pointer down on a column's resize handle.
    pub fn begin_resize(&mut self, col: usize, pointer_x: f32) -> bool {
        if col >= self.layout.len() {
            return false;
        }
        // A drag supersedes the popover and any live edit, like any other
        // pointer-down elsewhere.
        self.dropdown.close();
        self.commit_edit();

        let start_width = self.layout.width(col);
        self.resize.begin(&self.capture, col, pointer_x, start_width)
    }

    /// Pointer move while dragging: live width feedback, not persisted.
    pub fn resize_move(&mut self, pointer_x: f32) {
        if let Some((col, width)) = self.resize.preview_at(pointer_x) {
            self.layout.preview(col, width);
        }
    }

    /// Pointer release: commit and persist the final width.
    pub fn end_resize(&mut self, pointer_x: f32) {
        if let Some((col, width)) = self.resize.release(pointer_x) {
            self.layout.resize(col, width);
        }
    }

    /// Abort the drag, restoring the width the gesture started from.
    pub fn cancel_resize(&mut self) {
        if let Some((col, start_width)) = self.resize.cancel() {
            self.layout.preview(col, start_width);
        }
    }

    // =========================================================================
    // Edit session management
    // =========================================================================

    fn begin_edit_at(&mut self, addr: CellAddress, start: EditStart) {
        let Some(column) = self.schema.column(addr.col) else {
            return;
        };
        match &column.kind {
            ColumnKind::Text => {
                let original = self.store.get(addr.row, &column.key).to_string();
                self.editor = Some(match start {
                    EditStart::Preserve => EditSession::new(addr, original),
                    EditStart::Clear => EditSession::cleared(addr, original),
                });
                self.mode = Mode::Edit;
            }
            ColumnKind::SingleSelect(options) => {
                if self.dropdown.is_open_at(addr) {
                    self.dropdown.close();
                } else if !options.is_empty() {
                    let current = self.store.get(addr.row, &column.key).to_string();
                    self.dropdown = OptionDropdown::open(addr, options.clone(), &current);
                }
            }
        }
    }

    /// End the edit session: write the buffer if it diverged, discard it
    /// otherwise. An unchanged buffer performs zero store writes and never
    /// materializes a placeholder row.
    fn commit_edit(&mut self) {
        if let Some(session) = self.editor.take() {
            if session.is_dirty() {
                self.write_cell(session.address(), session.buffer());
            }
        }
        self.mode = Mode::Navigation;
    }

    /// End the edit session discarding all buffer edits.
    fn cancel_edit(&mut self) {
        self.editor = None;
        self.mode = Mode::Navigation;
    }

    fn write_cell(&mut self, addr: CellAddress, value: &str) {
        let Some(key) = self.schema.data_key(addr.col) else {
            return;
        };
        if let Err(err) = self.store.set(&self.schema, addr.row, key, value) {
            log::warn!("rejected cell write at {}: {}", addr, err);
        }
    }

    fn navigate(&mut self, direction: Direction) {
        // Navigation supersedes the popover (value already committed, if any).
        self.dropdown.close();
        let bounds = self.bounds();
        if let Some(target) = self.cursor.navigate(direction, bounds) {
            self.pending_focus = Some(target);
        }
    }

    fn is_select_col(&self, col: usize) -> bool {
        self.schema
            .column(col)
            .map(|column| column.kind.is_select())
            .unwrap_or(false)
    }

    fn is_text_col(&self, col: usize) -> bool {
        self.schema.is_data_col(col) && !self.is_select_col(col)
    }
}
