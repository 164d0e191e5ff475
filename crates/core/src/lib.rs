// Cell addressing and cursor navigation

pub mod address;
pub mod cursor;

pub use address::{CellAddress, Direction, GridBounds, FIRST_DATA_COL, GUTTER_COL};
pub use cursor::Cursor;
