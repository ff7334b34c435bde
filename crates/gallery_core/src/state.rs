use crate::view_model::{AppViewModel, TileView, LOADING_NOTICE, NO_FAVORITES_NOTICE};
use crate::{FavoriteSet, Feed, Item};

pub type PageIndex = u32;

/// Message shown after a page request fails.
pub const FETCH_FAILED_MESSAGE: &str = "No cats found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    Favorites,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    feed: Feed,
    favorites: FavoriteSet,
    /// Most recently requested page. Only ever moves forward.
    page: PageIndex,
    /// Page currently on the wire; at most one.
    in_flight: Option<PageIndex>,
    started: bool,
    view: ViewMode,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn page(&self) -> PageIndex {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<PageIndex> {
        self.in_flight
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_favorite(&self, identifier: &str) -> bool {
        self.favorites.contains(identifier)
    }

    pub fn view(&self) -> AppViewModel {
        let tiles = match self.view {
            ViewMode::All => self
                .feed
                .items()
                .iter()
                .map(|item| TileView {
                    identifier: item.identifier().to_string(),
                    image_url: item.url.clone(),
                    favorite: self.favorites.contains(item.identifier()),
                })
                .collect(),
            ViewMode::Favorites => self
                .favorites
                .items()
                .iter()
                .map(|item| TileView {
                    identifier: item.identifier().to_string(),
                    image_url: item.url.clone(),
                    favorite: true,
                })
                .collect(),
        };

        AppViewModel {
            view: self.view,
            tiles,
            loading_notice: (self.is_loading() && self.view == ViewMode::All)
                .then(|| LOADING_NOTICE.to_string()),
            favorites_notice: self
                .favorites
                .is_empty()
                .then(|| NO_FAVORITES_NOTICE.to_string()),
            error: self.error.clone(),
            page: self.page,
            feed_len: self.feed.len(),
            favorite_count: self.favorites.len(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the first page as in flight. Returns `None` if already started.
    pub(crate) fn start(&mut self) -> Option<PageIndex> {
        if self.started {
            return None;
        }
        self.started = true;
        self.in_flight = Some(self.page);
        self.mark_dirty();
        Some(self.page)
    }

    /// Whether the load-more triggers may fire right now.
    pub(crate) fn can_load_more(&self) -> bool {
        self.started && self.view == ViewMode::All && self.in_flight.is_none()
    }

    /// Advances the cursor by one and marks that page as in flight.
    pub(crate) fn advance_page(&mut self) -> PageIndex {
        self.page = self.page.saturating_add(1);
        self.in_flight = Some(self.page);
        self.mark_dirty();
        self.page
    }

    /// Applies a completed request. Returns false for a stale completion.
    pub(crate) fn complete_page(&mut self, page: PageIndex, batch: Option<Vec<Item>>) -> bool {
        if self.in_flight != Some(page) {
            return false;
        }
        self.in_flight = None;
        match batch {
            Some(items) => {
                self.feed.append(items);
                self.error = None;
            }
            None => {
                self.feed.clear();
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            self.view = view;
            self.mark_dirty();
        }
    }

    pub(crate) fn restore_favorites(&mut self, items: Vec<Item>) {
        self.favorites = FavoriteSet::from_items(items);
        self.mark_dirty();
    }

    /// Flips the favorite state of `identifier`. Returns false when nothing
    /// changed because the identifier is neither favorited nor loaded.
    pub(crate) fn toggle_favorite(&mut self, identifier: &str) -> bool {
        if self.favorites.remove(identifier).is_some() {
            self.mark_dirty();
            return true;
        }
        let Some(item) = self.feed.find(identifier).cloned() else {
            return false;
        };
        self.favorites.insert(item);
        self.mark_dirty();
        true
    }
}
