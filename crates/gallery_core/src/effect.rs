use crate::{Item, PageIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch this page; answer with exactly one `Msg::PageLoaded`.
    RequestPage { page: PageIndex },
    /// Overwrite the stored favorites with this snapshot.
    PersistFavorites { favorites: Vec<Item> },
}
