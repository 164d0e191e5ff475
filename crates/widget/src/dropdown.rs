//! Enumeration cell dropdown state machine.
//!
//! A single-select cell edits through a closed popover list instead of free
//! text. Selection IS the commit: cycling with the arrow keys writes the new
//! value immediately and keeps the popover open (live preview); clicking an
//! option writes and closes. Escape and outside clicks close without further
//! change. Cycling wraps around the option list, unlike the grid's clamped
//! navigation.

use gridlet_core::CellAddress;

use crate::mode::KeyModifiers;

/// State machine for the option dropdown.
#[derive(Debug, Clone, Default)]
pub enum OptionDropdown {
    /// No dropdown active.
    #[default]
    Closed,

    /// Dropdown is open for a cell.
    Open(DropdownOpenState),
}

/// State when the dropdown is open.
#[derive(Debug, Clone)]
pub struct DropdownOpenState {
    /// Anchor cell.
    pub address: CellAddress,

    /// The column's fixed option list, in cycle order.
    pub options: Vec<String>,

    /// Index of the current value in `options`; `None` for an unset cell.
    pub current: Option<usize>,
}

/// Result of routing an event to the dropdown handler.
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownOutcome {
    /// Event consumed, no further action needed.
    Consumed,
    /// Write this value through to the store; the popover stays open.
    CommitValue(String),
    /// Close the dropdown without committing anything further.
    CloseNoCommit,
    /// Event not handled by the dropdown, pass to the grid.
    NotConsumed,
}

impl OptionDropdown {
    /// Open the dropdown for a cell over its option list.
    pub fn open(address: CellAddress, options: Vec<String>, current_value: &str) -> Self {
        let current = options.iter().position(|option| option == current_value);
        Self::Open(DropdownOpenState {
            address,
            options,
            current,
        })
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// True when the dropdown is open and anchored at `addr`.
    pub fn is_open_at(&self, addr: CellAddress) -> bool {
        matches!(self, Self::Open(state) if state.address == addr)
    }

    pub fn as_open(&self) -> Option<&DropdownOpenState> {
        match self {
            Self::Open(state) => Some(state),
            Self::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut DropdownOpenState> {
        match self {
            Self::Open(state) => Some(state),
            Self::Closed => None,
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }
}

impl DropdownOpenState {
    /// The option the current value resolves to, if any.
    pub fn current_option(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    /// Step the selection by `step` over the option list, wrapping around,
    /// and return the newly selected value. An unset cell enters the cycle
    /// at the first option going down and the last going up.
    pub fn cycle(&mut self, step: i32) -> String {
        let n = self.options.len() as i32;
        debug_assert!(n > 0, "dropdown opened over an empty option list");

        let index = match self.current {
            Some(current) => (current as i32 + step).rem_euclid(n),
            None if step > 0 => 0,
            None => n - 1,
        } as usize;

        self.current = Some(index);
        self.options[index].clone()
    }

    /// Explicit selection (option click). Returns the value to write; the
    /// caller closes the popover.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let value = self.options.get(index)?.clone();
        self.current = Some(index);
        Some(value)
    }

    /// Handle a key event. Returns the outcome for the caller to act on.
    pub fn handle_key(&mut self, key: &str, modifiers: KeyModifiers) -> DropdownOutcome {
        if modifiers.any_command() {
            return DropdownOutcome::NotConsumed;
        }

        match key {
            "escape" => DropdownOutcome::CloseNoCommit,

            // Cycling already committed each step; Enter just closes.
            "enter" => DropdownOutcome::CloseNoCommit,

            // Tab closes and lets the grid handle navigation.
            "tab" => DropdownOutcome::CloseNoCommit,

            "up" => DropdownOutcome::CommitValue(self.cycle(-1)),

            "down" => DropdownOutcome::CommitValue(self.cycle(1)),

            _ => DropdownOutcome::NotConsumed,
        }
    }
}
