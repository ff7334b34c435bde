//! Gallery core: pure feed/favorites state machine and view-model helpers.
mod codec;
mod effect;
mod favorites;
mod feed;
mod item;
mod msg;
mod state;
mod update;
mod view_model;
mod viewport;

pub use codec::{decode_favorites, encode_favorites, CodecError, FAVORITES_STORAGE_KEY};
pub use effect::Effect;
pub use favorites::FavoriteSet;
pub use feed::Feed;
pub use item::Item;
pub use msg::{Msg, PageOutcome};
pub use state::{AppState, PageIndex, ViewMode, FETCH_FAILED_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, TileView, LOADING_NOTICE, NO_FAVORITES_NOTICE};
pub use viewport::{Viewport, SCROLL_THRESHOLD_PX};
