//! Proportional scrollbar geometry for a horizontally paged list.

/// Maps scroll offsets to thumb positions and back for a custom scrollbar
/// drawn under a paged horizontal list.
///
/// Content width is `viewport_width * page_count`; the thumb length and its
/// travel are proportional to how much of the content fits the container.
/// `thumb_position` and `scroll_offset` are exact algebraic inverses over
/// the valid scroll range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrollbar {
    container_width: f64,
    content_width: f64,
}

impl Scrollbar {
    pub fn new(viewport_width: f64, page_count: usize, container_width: f64) -> Self {
        Self {
            container_width,
            content_width: viewport_width * page_count as f64,
        }
    }

    /// Thumb length scaled by the visible fraction of the content.
    pub fn thumb_length(&self) -> f64 {
        if self.content_width <= 0.0 {
            return 0.0;
        }
        (self.container_width / self.content_width) * self.container_width
    }

    /// How far the thumb can move inside the container, floored at zero.
    pub fn max_thumb_travel(&self) -> f64 {
        (self.container_width - self.thumb_length()).max(0.0)
    }

    fn scrollable_width(&self) -> f64 {
        (self.content_width - self.container_width).max(1.0)
    }

    /// Thumb position for a scroll offset, clamped to the travel range.
    pub fn thumb_position(&self, scroll_offset: f64) -> f64 {
        let travel = self.max_thumb_travel();
        ((scroll_offset / self.scrollable_width()) * travel).clamp(0.0, travel)
    }

    /// Scroll offset that puts the thumb at `thumb_position`; the inverse
    /// of [`Self::thumb_position`].
    pub fn scroll_offset(&self, thumb_position: f64) -> f64 {
        let travel = self.max_thumb_travel();
        if travel <= 0.0 {
            return 0.0;
        }
        (thumb_position.clamp(0.0, travel) / travel) * self.scrollable_width()
    }
}

#[cfg(test)]
mod tests {
    use super::Scrollbar;

    #[test]
    fn round_trips_within_tolerance() {
        let bar = Scrollbar::new(360.0, 3, 120.0);
        let max_scroll = 360.0 * 3.0 - 120.0;

        for step in 0..=20 {
            let offset = max_scroll * step as f64 / 20.0;
            let back = bar.scroll_offset(bar.thumb_position(offset));
            assert!((back - offset).abs() < 1e-9, "offset {offset} came back as {back}");
        }
    }

    #[test]
    fn positions_clamp_to_travel() {
        let bar = Scrollbar::new(360.0, 3, 120.0);
        let travel = bar.max_thumb_travel();
        assert!(bar.thumb_position(-500.0) >= 0.0);
        assert!(bar.thumb_position(10_000.0) <= travel);
        assert_eq!(bar.scroll_offset(-5.0), 0.0);
    }

    #[test]
    fn single_page_leaves_no_travel() {
        // Content narrower than the container: the thumb fills the track
        let bar = Scrollbar::new(100.0, 1, 120.0);
        assert_eq!(bar.max_thumb_travel(), 0.0);
        assert_eq!(bar.thumb_position(50.0), 0.0);
        assert_eq!(bar.scroll_offset(50.0), 0.0);
    }
}
