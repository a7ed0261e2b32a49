//! Viewport geometry.
//!
//! Pure calculations shared by the pager and the navigator: how many rows
//! of content fit, which slice of the backing list is visible at a given
//! offset, and how far the offset may go. Kept free of terminal state so
//! the scroll properties can be tested headless.

use std::ops::Range;

/// Rows available for content once header/footer rows are reserved.
/// Always at least 1 so a tiny terminal degrades instead of dividing by zero.
pub fn visible_rows(total_rows: u16, reserved_rows: u16) -> usize {
    total_rows.saturating_sub(reserved_rows).max(1) as usize
}

/// The visible window `[offset, offset + visible_rows)` clipped to the
/// content bounds. Empty content yields an empty range.
pub fn visible_range(offset: usize, visible_rows: usize, content_len: usize) -> Range<usize> {
    let start = offset.min(content_len);
    let end = offset.saturating_add(visible_rows).min(content_len);
    start..end
}

/// Largest legal offset: scrolled so the last window of content is shown.
pub fn max_offset(content_len: usize, visible_rows: usize) -> usize {
    content_len.saturating_sub(visible_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rows_reserves_header_footer() {
        assert_eq!(visible_rows(24, 4), 20);
        assert_eq!(visible_rows(10, 4), 6);
    }

    #[test]
    fn test_visible_rows_floor_is_one() {
        assert_eq!(visible_rows(3, 4), 1);
        assert_eq!(visible_rows(0, 4), 1);
    }

    #[test]
    fn test_visible_range_inside_content() {
        assert_eq!(visible_range(5, 10, 100), 5..15);
    }

    #[test]
    fn test_visible_range_clips_at_end() {
        assert_eq!(visible_range(95, 10, 100), 95..100);
    }

    #[test]
    fn test_visible_range_empty_content() {
        assert_eq!(visible_range(0, 10, 0), 0..0);
        assert!(visible_range(3, 10, 0).is_empty());
    }

    #[test]
    fn test_max_offset() {
        assert_eq!(max_offset(100, 10), 90);
        assert_eq!(max_offset(5, 10), 0);
        assert_eq!(max_offset(0, 10), 0);
    }

    #[test]
    fn test_window_length_property() {
        // len(slice) == min(visible_rows, content_len - offset) for all
        // legal offsets, and the slice never leaves the content bounds.
        for content_len in [0usize, 1, 5, 10, 37] {
            for visible in [1usize, 3, 10] {
                for offset in 0..=max_offset(content_len, visible) {
                    let range = visible_range(offset, visible, content_len);
                    assert_eq!(range.len(), visible.min(content_len - offset));
                    assert!(range.end <= content_len);
                }
            }
        }
    }
}
