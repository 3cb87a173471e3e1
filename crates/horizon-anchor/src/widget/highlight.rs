//! Keyboard highlight cursor over the visible rows.
//!
//! The cursor is an index into the *visible* (post-filter) rows and is
//! independent of the committed selection. `None` means no row is
//! highlighted. The owning surface resets it whenever it opens, closes, or the
//! visible rows change.
//!
//! Arrow movement wraps around. Disabled rows are reachable by default (they
//! can be highlighted but not committed); enable
//! [`HighlightCursor::with_skip_disabled`] to step over them instead.

use horizon_anchor_core::logging::targets;

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One row down, wrapping to the first row.
    Next,
    /// One row up, wrapping to the last row.
    Previous,
    /// The first row.
    First,
    /// The last row.
    Last,
    /// One page down, clamped to the last row.
    PageNext,
    /// One page up, clamped to the first row.
    PagePrevious,
}

/// Highlighted-row cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightCursor {
    index: Option<usize>,
    skip_disabled: bool,
    page_size: usize,
}

impl Default for HighlightCursor {
    fn default() -> Self {
        Self {
            index: None,
            skip_disabled: false,
            page_size: 8,
        }
    }
}

impl HighlightCursor {
    /// Create a cursor with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step over disabled rows when moving.
    #[must_use]
    pub fn with_skip_disabled(mut self, skip: bool) -> Self {
        self.skip_disabled = skip;
        self
    }

    /// Rows moved by a page step. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_page_size(mut self, rows: usize) -> Self {
        self.page_size = rows.max(1);
        self
    }

    pub fn skips_disabled(&self) -> bool {
        self.skip_disabled
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The highlighted visible row, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Clear the highlight.
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Highlight `index` directly (pointer hover). Out-of-range clears the highlight.
    pub fn set(&mut self, index: usize, len: usize) -> Option<usize> {
        self.index = (index < len).then_some(index);
        self.index
    }

    /// Move the cursor over `len` visible rows.
    ///
    /// `is_disabled(i)` reports whether visible row `i` is disabled; it is only
    /// consulted when disabled rows are skipped.
    pub fn move_by(
        &mut self,
        direction: Direction,
        len: usize,
        is_disabled: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        if len == 0 {
            self.index = None;
            return None;
        }

        let last = len - 1;
        let current = self.index.filter(|&i| i < len);
        let target = match direction {
            Direction::Next => current.map_or(0, |i| if i >= last { 0 } else { i + 1 }),
            Direction::Previous => match current {
                None | Some(0) => last,
                Some(i) => i - 1,
            },
            Direction::First => 0,
            Direction::Last => last,
            Direction::PageNext => current
                .map_or(self.page_size - 1, |i| i + self.page_size)
                .min(last),
            Direction::PagePrevious => current.map_or(0, |i| i.saturating_sub(self.page_size)),
        };

        let resolved = if self.skip_disabled && is_disabled(target) {
            self.nearest_enabled(direction, target, len, &is_disabled)
                .or(current)
        } else {
            Some(target)
        };

        self.index = resolved;
        tracing::trace!(target: targets::NAVIGATION, ?direction, index = ?self.index, "highlight moved");
        self.index
    }

    fn nearest_enabled(
        &self,
        direction: Direction,
        target: usize,
        len: usize,
        is_disabled: &impl Fn(usize) -> bool,
    ) -> Option<usize> {
        match direction {
            // Wrapping steps keep going in the same direction.
            Direction::Next => (0..len).map(|k| (target + k) % len).find(|&i| !is_disabled(i)),
            Direction::Previous => (0..len)
                .map(|k| (target + len - k) % len)
                .find(|&i| !is_disabled(i)),
            // Clamped steps search forward first, then backward.
            Direction::First | Direction::PageNext => (target..len)
                .find(|&i| !is_disabled(i))
                .or_else(|| (0..target).rev().find(|&i| !is_disabled(i))),
            Direction::Last | Direction::PagePrevious => (0..=target)
                .rev()
                .find(|&i| !is_disabled(i))
                .or_else(|| (target + 1..len).find(|&i| !is_disabled(i))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(_: usize) -> bool {
        false
    }

    #[test]
    fn test_next_from_none_and_wrap() {
        let mut cursor = HighlightCursor::new();
        assert_eq!(cursor.move_by(Direction::Next, 3, enabled), Some(0));
        assert_eq!(cursor.move_by(Direction::Next, 3, enabled), Some(1));
        assert_eq!(cursor.move_by(Direction::Next, 3, enabled), Some(2));
        assert_eq!(cursor.move_by(Direction::Next, 3, enabled), Some(0));
    }

    #[test]
    fn test_previous_wraps_from_zero_and_none() {
        let mut cursor = HighlightCursor::new();
        assert_eq!(cursor.move_by(Direction::Previous, 4, enabled), Some(3));

        cursor.set(0, 4);
        assert_eq!(cursor.move_by(Direction::Previous, 4, enabled), Some(3));
    }

    #[test]
    fn test_empty_list_stays_none() {
        let mut cursor = HighlightCursor::new();
        assert_eq!(cursor.move_by(Direction::Next, 0, enabled), None);
        assert_eq!(cursor.move_by(Direction::Previous, 0, enabled), None);
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_disabled_not_skipped_by_default() {
        let disabled = |i: usize| i == 1;
        let mut cursor = HighlightCursor::new();
        cursor.move_by(Direction::Next, 3, disabled);
        assert_eq!(cursor.move_by(Direction::Next, 3, disabled), Some(1));
    }

    #[test]
    fn test_skip_disabled() {
        let disabled = |i: usize| i == 1 || i == 2;
        let mut cursor = HighlightCursor::new().with_skip_disabled(true);
        assert_eq!(cursor.move_by(Direction::Next, 4, disabled), Some(0));
        assert_eq!(cursor.move_by(Direction::Next, 4, disabled), Some(3));
        assert_eq!(cursor.move_by(Direction::Next, 4, disabled), Some(0));
        assert_eq!(cursor.move_by(Direction::Previous, 4, disabled), Some(3));
        assert_eq!(cursor.move_by(Direction::Previous, 4, disabled), Some(0));
    }

    #[test]
    fn test_skip_disabled_all_disabled_does_not_move() {
        let mut cursor = HighlightCursor::new().with_skip_disabled(true);
        assert_eq!(cursor.move_by(Direction::Next, 3, |_| true), None);
    }

    #[test]
    fn test_home_end_and_pages() {
        let mut cursor = HighlightCursor::new().with_page_size(3);
        assert_eq!(cursor.move_by(Direction::Last, 10, enabled), Some(9));
        assert_eq!(cursor.move_by(Direction::PagePrevious, 10, enabled), Some(6));
        assert_eq!(cursor.move_by(Direction::PageNext, 10, enabled), Some(9));
        assert_eq!(cursor.move_by(Direction::PageNext, 10, enabled), Some(9));
        assert_eq!(cursor.move_by(Direction::First, 10, enabled), Some(0));
        assert_eq!(cursor.move_by(Direction::PagePrevious, 10, enabled), Some(0));

        cursor.reset();
        assert_eq!(cursor.move_by(Direction::PageNext, 10, enabled), Some(2));
    }

    #[test]
    fn test_set_out_of_range_clears() {
        let mut cursor = HighlightCursor::new();
        assert_eq!(cursor.set(2, 3), Some(2));
        assert_eq!(cursor.set(3, 3), None);
    }
}
