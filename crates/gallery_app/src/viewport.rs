//! Terminal stand-in for a scrolling window: tiles laid out in a grid of
//! fixed-height rows, with scroll notifications to subscribers.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use gallery_core::Viewport;

pub type SubscriptionId = u64;
pub type ViewportListener = Box<dyn FnMut(Viewport)>;

/// Source of scroll change notifications.
pub trait ViewportSignal {
    fn current(&self) -> Viewport;
    fn subscribe(&mut self, listener: ViewportListener) -> SubscriptionId;
    /// Returns false if the id was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Keeps a listener attached for as long as the guard lives.
pub struct ViewportSubscription<S: ViewportSignal> {
    signal: Rc<RefCell<S>>,
    id: SubscriptionId,
}

impl<S: ViewportSignal> ViewportSubscription<S> {
    pub fn attach(signal: &Rc<RefCell<S>>, listener: ViewportListener) -> Self {
        let id = signal.borrow_mut().subscribe(listener);
        Self {
            signal: Rc::clone(signal),
            id,
        }
    }
}

impl<S: ViewportSignal> Drop for ViewportSubscription<S> {
    fn drop(&mut self) {
        if let Ok(mut signal) = self.signal.try_borrow_mut() {
            signal.unsubscribe(self.id);
        }
    }
}

pub struct SimulatedViewport {
    viewport_height: u32,
    tile_height: u32,
    columns: u32,
    tile_count: usize,
    scroll_offset: u32,
    listeners: Vec<(SubscriptionId, ViewportListener)>,
    next_id: SubscriptionId,
}

impl SimulatedViewport {
    pub fn new(viewport_height: u32, tile_height: u32, columns: u32) -> Self {
        Self {
            viewport_height,
            tile_height: tile_height.max(1),
            columns: columns.max(1),
            tile_count: 0,
            scroll_offset: 0,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn rows(&self) -> u32 {
        let count = u32::try_from(self.tile_count).unwrap_or(u32::MAX);
        count.div_ceil(self.columns)
    }

    fn content_height(&self) -> u32 {
        self.rows().saturating_mul(self.tile_height)
    }

    fn max_offset(&self) -> u32 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Re-lays out after a render. Does not notify.
    pub fn set_tile_count(&mut self, tile_count: usize) {
        self.tile_count = tile_count;
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = i64::from(self.scroll_offset).saturating_add(delta);
        let clamped = target.clamp(0, i64::from(self.max_offset()));
        self.scroll_offset = u32::try_from(clamped).unwrap_or(0);
        self.notify();
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = self.max_offset();
        self.notify();
    }

    /// Indices of the tiles at least partly on screen.
    pub fn visible_tiles(&self) -> Range<usize> {
        let columns = self.columns as usize;
        let first_row = (self.scroll_offset / self.tile_height) as usize;
        let bottom = self.scroll_offset.saturating_add(self.viewport_height);
        let last_row = bottom.div_ceil(self.tile_height) as usize;
        let start = (first_row * columns).min(self.tile_count);
        let end = (last_row * columns).min(self.tile_count);
        start..end
    }

    fn notify(&mut self) {
        let current = self.current();
        for (_, listener) in &mut self.listeners {
            listener(current);
        }
    }
}

impl ViewportSignal for SimulatedViewport {
    fn current(&self) -> Viewport {
        Viewport::new(self.scroll_offset, self.viewport_height, self.content_height())
    }

    fn subscribe(&mut self, listener: ViewportListener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
