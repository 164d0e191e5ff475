//! Cell edit session: buffered text for exactly one cell.
//!
//! Handles:
//! - Buffer and caret manipulation (insert, backspace, delete, home/end)
//! - Commit triggers (Enter, Tab, arrows, blur) and cancel (Escape)
//! - The caret-at-boundary rule: left/right arrows exit the cell only when
//!   the caret already sits at the start/end of the buffer
//!
//! No store writes happen here; the grid decides whether a commit actually
//! writes (an unchanged buffer is skipped entirely).

use gridlet_core::{CellAddress, Direction};

use crate::mode::KeyModifiers;

/// Transient state for the single cell being edited.
#[derive(Debug, Clone)]
pub struct EditSession {
    address: CellAddress,
    buffer: String,
    original: String,
    /// Caret byte offset into `buffer`; always on a char boundary.
    caret: usize,
}

/// What the caller should do after a keystroke reaches the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Keystroke handled inside the buffer.
    Consumed,
    /// End the session, write the buffer if dirty, then navigate.
    Commit { advance: Option<Direction> },
    /// End the session, discarding the buffer.
    Cancel,
    /// Not an editor key; pass to the grid.
    NotConsumed,
}

impl EditSession {
    /// Start editing with the committed value in the buffer, caret at end.
    pub fn new(address: CellAddress, original: impl Into<String>) -> Self {
        let original = original.into();
        let caret = original.len();
        Self {
            address,
            buffer: original.clone(),
            original,
            caret,
        }
    }

    /// Start editing with a cleared buffer (type-to-replace).
    pub fn cleared(address: CellAddress, original: impl Into<String>) -> Self {
        Self {
            address,
            buffer: String::new(),
            original: original.into(),
            caret: 0,
        }
    }

    pub fn address(&self) -> CellAddress {
        self.address
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// True when the buffer diverges from the committed value.
    pub fn is_dirty(&self) -> bool {
        self.buffer != self.original
    }

    pub fn caret_at_start(&self) -> bool {
        self.caret == 0
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret == self.buffer.len()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.caret, ch);
        self.caret += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.replace_range(prev..self.caret, "");
            self.caret = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.buffer.replace_range(self.caret..next, "");
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.caret]
            .char_indices()
            .last()
            .map(|(index, _)| index)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.caret..]
            .chars()
            .next()
            .map(|ch| self.caret + ch.len_utf8())
    }

    fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.caret = prev;
        }
    }

    fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.caret = next;
        }
    }

    /// Route one keystroke. Printable characters go through `insert_char`.
    pub fn handle_key(&mut self, key: &str, modifiers: KeyModifiers) -> EditOutcome {
        if modifiers.any_command() {
            return EditOutcome::NotConsumed;
        }

        match key {
            "enter" => EditOutcome::Commit {
                advance: Some(Direction::Down),
            },

            "tab" => EditOutcome::Commit {
                advance: Some(if modifiers.shift {
                    Direction::Left
                } else {
                    Direction::Right
                }),
            },

            "escape" => EditOutcome::Cancel,

            // Already editing; a second F2 must not restart the session.
            "f2" => EditOutcome::Consumed,

            "left" => {
                if self.caret_at_start() {
                    EditOutcome::Commit {
                        advance: Some(Direction::Left),
                    }
                } else {
                    self.move_left();
                    EditOutcome::Consumed
                }
            }

            "right" => {
                if self.caret_at_end() {
                    EditOutcome::Commit {
                        advance: Some(Direction::Right),
                    }
                } else {
                    self.move_right();
                    EditOutcome::Consumed
                }
            }

            "up" => EditOutcome::Commit {
                advance: Some(Direction::Up),
            },

            "down" => EditOutcome::Commit {
                advance: Some(Direction::Down),
            },

            "home" => {
                self.caret = 0;
                EditOutcome::Consumed
            }

            "end" => {
                self.caret = self.buffer.len();
                EditOutcome::Consumed
            }

            "backspace" => {
                self.backspace();
                EditOutcome::Consumed
            }

            "delete" => {
                self.delete_forward();
                EditOutcome::Consumed
            }

            _ => EditOutcome::NotConsumed,
        }
    }
}
