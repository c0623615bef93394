//! Reading progress and back-to-top visibility.

/// Distance scrolled past which the back-to-top control appears.
pub const BACK_TO_TOP_OFFSET: u32 = 30;
/// Distance scrolled past which the header gets its raised style.
pub const HEADER_ELEVATION_OFFSET: u32 = 3;

/// Percentage of the document scrolled, clamped to `0..=100`.
///
/// `offset` is the first visible line, `content_height` the total line count
/// and `viewport_height` the visible line count.
pub fn reading_progress(offset: u32, content_height: u32, viewport_height: u32) -> u8 {
    let scrollable = content_height.saturating_sub(viewport_height);
    if scrollable == 0 {
        return 0;
    }
    let pct = u64::from(offset) * 100 / u64::from(scrollable);
    pct.min(100) as u8
}

pub fn show_back_to_top(offset: u32) -> bool {
    offset > BACK_TO_TOP_OFFSET
}

pub fn header_elevated(offset: u32) -> bool {
    offset > HEADER_ELEVATION_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bounds() {
        assert_eq!(reading_progress(0, 200, 50), 0);
        assert_eq!(reading_progress(75, 200, 50), 50);
        assert_eq!(reading_progress(150, 200, 50), 100);
        assert_eq!(reading_progress(500, 200, 50), 100);
    }

    #[test]
    fn test_content_that_fits_reports_zero() {
        assert_eq!(reading_progress(0, 20, 50), 0);
        assert_eq!(reading_progress(10, 50, 50), 0);
    }

    #[test]
    fn test_back_to_top_threshold() {
        assert!(!show_back_to_top(0));
        assert!(!show_back_to_top(BACK_TO_TOP_OFFSET));
        assert!(show_back_to_top(BACK_TO_TOP_OFFSET + 1));
        assert!(!header_elevated(HEADER_ELEVATION_OFFSET));
        assert!(header_elevated(HEADER_ELEVATION_OFFSET + 1));
    }
}
