/// Distance from the bottom of the content, in pixels, at which the scroll
/// trigger fires.
pub const SCROLL_THRESHOLD_PX: u32 = 300;

/// Snapshot of the scroll/viewport signal, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll_offset: u32,
    pub viewport_height: u32,
    pub content_height: u32,
}

impl Viewport {
    pub fn new(scroll_offset: u32, viewport_height: u32, content_height: u32) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            content_height,
        }
    }

    /// True when the bottom edge of the viewport is within `threshold` of
    /// the end of the content.
    pub fn is_near_bottom(&self, threshold: u32) -> bool {
        let visible_bottom = self.scroll_offset.saturating_add(self.viewport_height);
        visible_bottom >= self.content_height.saturating_sub(threshold)
    }

    /// True when the content does not make the page scrollable.
    pub fn is_underfilled(&self) -> bool {
        self.content_height <= self.viewport_height
    }
}
