use thiserror::Error;

use crate::Item;

/// Key under which the favorites are stored.
pub const FAVORITES_STORAGE_KEY: &str = "favoriteCats";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored favorites are malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to encode favorites: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Serialize favorites as a JSON array of item records.
pub fn encode_favorites(favorites: &[Item]) -> Result<String, CodecError> {
    serde_json::to_string(favorites).map_err(CodecError::Encode)
}

/// Parse a stored favorites value. Never panics on bad input.
pub fn decode_favorites(raw: &str) -> Result<Vec<Item>, CodecError> {
    serde_json::from_str(raw).map_err(CodecError::Malformed)
}
