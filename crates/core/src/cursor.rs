//! Active-cell cursor state machine.
//!
//! At most one cell is active system-wide. `Idle` means no active cell;
//! `Active(address)` is the single keyboard target. Navigation is clamped to
//! the grid bounds and never lands on the gutter or the add-column sentinel.

use serde::{Deserialize, Serialize};

use crate::address::{CellAddress, Direction, GridBounds};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Idle,
    Active(CellAddress),
}

impl Cursor {
    pub fn is_active(&self) -> bool {
        matches!(self, Cursor::Active(_))
    }

    /// True when `addr` is the active cell.
    pub fn is_at(&self, addr: CellAddress) -> bool {
        matches!(self, Cursor::Active(current) if *current == addr)
    }

    pub fn address(&self) -> Option<CellAddress> {
        match self {
            Cursor::Active(addr) => Some(*addr),
            Cursor::Idle => None,
        }
    }

    /// Activate the clicked cell from any state. Returns the (clamped)
    /// address that became active.
    pub fn click(&mut self, addr: CellAddress, bounds: GridBounds) -> CellAddress {
        let target = bounds.clamp(addr);
        *self = Cursor::Active(target);
        target
    }

    /// Move one cell in `direction`, clamped to `bounds`. Returns the new
    /// address, or `None` when there is no active cell to move from.
    pub fn navigate(&mut self, direction: Direction, bounds: GridBounds) -> Option<CellAddress> {
        let current = self.address()?;
        let target = bounds.step(current, direction);
        *self = Cursor::Active(target);
        Some(target)
    }

    pub fn clear(&mut self) {
        *self = Cursor::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GridBounds {
        GridBounds::new(20, 9)
    }

    #[test]
    fn test_click_activates_from_idle() {
        let mut cursor = Cursor::Idle;
        assert!(!cursor.is_active());

        let target = cursor.click(CellAddress::new(3, 2), bounds());
        assert_eq!(target, CellAddress::new(3, 2));
        assert_eq!(cursor.address(), Some(target));
    }

    #[test]
    fn test_click_clamps_into_bounds() {
        let mut cursor = Cursor::Idle;
        let target = cursor.click(CellAddress::new(100, 0), bounds());
        assert_eq!(target, CellAddress::new(19, 1));
    }

    #[test]
    fn test_navigate_requires_active_cell() {
        let mut cursor = Cursor::Idle;
        assert_eq!(cursor.navigate(Direction::Down, bounds()), None);
        assert!(!cursor.is_active());
    }

    #[test]
    fn test_navigate_steps_and_clamps() {
        let mut cursor = Cursor::Active(CellAddress::new(0, 1));

        assert_eq!(
            cursor.navigate(Direction::Down, bounds()),
            Some(CellAddress::new(1, 1))
        );
        // Up from row 0 stays put (clamped, not wrapped).
        cursor = Cursor::Active(CellAddress::new(0, 1));
        assert_eq!(
            cursor.navigate(Direction::Up, bounds()),
            Some(CellAddress::new(0, 1))
        );
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut cursor = Cursor::Active(CellAddress::new(2, 2));
        cursor.clear();
        assert_eq!(cursor, Cursor::Idle);
    }
}
