use crate::{PageIndex, ViewMode};

pub const LOADING_NOTICE: &str = "Loading...";
pub const NO_FAVORITES_NOTICE: &str = "You don't have any favorite cats";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub view: ViewMode,
    pub tiles: Vec<TileView>,
    pub loading_notice: Option<String>,
    pub favorites_notice: Option<String>,
    pub error: Option<String>,
    pub page: PageIndex,
    pub feed_len: usize,
    pub favorite_count: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub identifier: String,
    pub image_url: String,
    pub favorite: bool,
}
