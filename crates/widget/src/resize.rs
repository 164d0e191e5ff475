//! Column resize drag state machine with exclusive pointer capture.
//!
//! While a drag is live, all pointer input must route to the controller no
//! matter what element sits under the pointer. The capture token models
//! that: a single-owner lock acquired on drag begin and released on every
//! exit path, including teardown mid-drag. A dangling capture would swallow
//! all future pointer input, so release is guaranteed by `Drop`.

use std::cell::Cell;
use std::rc::Rc;

use gridlet_config::MIN_COLUMN_WIDTH;

/// Single-owner pointer-capture lock. UI-thread only.
#[derive(Clone, Debug, Default)]
pub struct PointerCapture {
    held: Rc<Cell<bool>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Acquire the capture. Returns `None` when another owner holds it.
    pub fn acquire(&self) -> Option<CaptureGuard> {
        if self.held.get() {
            return None;
        }
        self.held.set(true);
        Some(CaptureGuard {
            held: Rc::clone(&self.held),
        })
    }
}

/// Releases the capture when dropped, on every exit path.
#[derive(Debug)]
pub struct CaptureGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}

/// One in-progress resize gesture.
#[derive(Debug, Default)]
pub enum ResizeDrag {
    #[default]
    Idle,
    Dragging(DragState),
}

#[derive(Debug)]
pub struct DragState {
    pub col: usize,
    pub start_pointer_x: f32,
    pub start_width: u32,
    // Held for the lifetime of the drag; dropping it releases the capture.
    _guard: CaptureGuard,
}

impl ResizeDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn as_drag(&self) -> Option<&DragState> {
        match self {
            Self::Dragging(state) => Some(state),
            Self::Idle => None,
        }
    }

    /// Start a drag on `col`. Fails (returns false) when a drag is already
    /// live or the capture is held elsewhere.
    pub fn begin(
        &mut self,
        capture: &PointerCapture,
        col: usize,
        pointer_x: f32,
        start_width: u32,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        match capture.acquire() {
            Some(guard) => {
                *self = Self::Dragging(DragState {
                    col,
                    start_pointer_x: pointer_x,
                    start_width,
                    _guard: guard,
                });
                true
            }
            None => false,
        }
    }

    /// Column and width for the current pointer position (live feedback).
    pub fn preview_at(&self, pointer_x: f32) -> Option<(usize, u32)> {
        let drag = self.as_drag()?;
        let delta = (pointer_x - drag.start_pointer_x) as i64;
        let width = (drag.start_width as i64 + delta).max(MIN_COLUMN_WIDTH as i64) as u32;
        Some((drag.col, width))
    }

    /// Finish the drag: returns the column and final width to commit, and
    /// releases the capture.
    pub fn release(&mut self, pointer_x: f32) -> Option<(usize, u32)> {
        let result = self.preview_at(pointer_x);
        *self = Self::Idle;
        result
    }

    /// Abort the drag: returns the column and start width to restore, and
    /// releases the capture.
    pub fn cancel(&mut self) -> Option<(usize, u32)> {
        let restore = self.as_drag().map(|drag| (drag.col, drag.start_width));
        *self = Self::Idle;
        restore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_math_clamps_to_floor() {
        let capture = PointerCapture::new();
        let mut drag = ResizeDrag::default();
        assert!(drag.begin(&capture, 1, 300.0, 300));

        assert_eq!(drag.preview_at(250.0), Some((1, 250)));
        assert_eq!(drag.preview_at(350.0), Some((1, 350)));
        // Huge negative delta clamps at the floor.
        assert_eq!(drag.preview_at(-5000.0), Some((1, MIN_COLUMN_WIDTH)));
    }

    #[test]
    fn test_release_returns_final_width_and_frees_capture() {
        let capture = PointerCapture::new();
        let mut drag = ResizeDrag::default();
        assert!(drag.begin(&capture, 1, 300.0, 300));
        assert!(capture.is_held());

        assert_eq!(drag.release(250.0), Some((1, 250)));
        assert!(!drag.is_dragging());
        assert!(!capture.is_held());
    }

    #[test]
    fn test_cancel_restores_start_width() {
        let capture = PointerCapture::new();
        let mut drag = ResizeDrag::default();
        assert!(drag.begin(&capture, 2, 100.0, 140));

        assert_eq!(drag.cancel(), Some((2, 140)));
        assert!(!capture.is_held());
        // Cancel with no drag is a no-op.
        assert_eq!(drag.cancel(), None);
    }

    #[test]
    fn test_capture_is_exclusive() {
        let capture = PointerCapture::new();
        let mut first = ResizeDrag::default();
        let mut second = ResizeDrag::default();

        assert!(first.begin(&capture, 0, 0.0, 100));
        assert!(!second.begin(&capture, 1, 0.0, 100));

        first.release(10.0);
        assert!(second.begin(&capture, 1, 0.0, 100));
    }

    #[test]
    fn test_teardown_mid_drag_releases_capture() {
        let capture = PointerCapture::new();
        {
            let mut drag = ResizeDrag::default();
            assert!(drag.begin(&capture, 0, 0.0, 100));
            assert!(capture.is_held());
            // Controller dropped while dragging.
        }
        assert!(!capture.is_held());
    }
}
