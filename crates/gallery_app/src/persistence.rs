use gallery_core::{decode_favorites, encode_favorites, Item, FAVORITES_STORAGE_KEY};
use gallery_engine::KeyValueStore;
use gallery_logging::{gallery_error, gallery_info, gallery_warn};

/// Reads the stored favorites. Absent, unreadable or corrupt values all
/// yield an empty list; a corrupt value stays in the store until the next
/// favorite change overwrites it.
pub(crate) fn load_favorites(store: &dyn KeyValueStore) -> Vec<Item> {
    let raw = match store.get(FAVORITES_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            gallery_warn!("Failed to read stored favorites: {}", err);
            return Vec::new();
        }
    };

    match decode_favorites(&raw) {
        Ok(items) => {
            gallery_info!("Loaded {} stored favorites", items.len());
            items
        }
        Err(err) => {
            gallery_warn!("Ignoring stored favorites: {}", err);
            Vec::new()
        }
    }
}

/// Overwrites the stored favorites with `favorites`.
pub(crate) fn save_favorites(store: &mut dyn KeyValueStore, favorites: &[Item]) {
    let content = match encode_favorites(favorites) {
        Ok(text) => text,
        Err(err) => {
            gallery_error!("Failed to serialize favorites: {}", err);
            return;
        }
    };

    if let Err(err) = store.set(FAVORITES_STORAGE_KEY, &content) {
        gallery_error!("Failed to write favorites: {}", err);
    }
}
