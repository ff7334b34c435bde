use crate::{Item, PageIndex, ViewMode, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application started; requests the first page.
    Started,
    /// Favorites read from the persistent store at startup.
    FavoritesRestored(Vec<Item>),
    /// The user scrolled.
    Scrolled(Viewport),
    /// Layout was measured after a render.
    LayoutMeasured(Viewport),
    /// A page request finished, successfully or not.
    PageLoaded {
        page: PageIndex,
        outcome: PageOutcome,
    },
    /// User switched between the feed and the favorites.
    ViewSelected(ViewMode),
    /// User clicked an item.
    FavoriteToggled(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded(Vec<Item>),
    Failed,
}
