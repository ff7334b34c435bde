use std::fmt::Write;
use std::ops::Range;

use gallery_core::{AppViewModel, ViewMode};

const FAVORITE_MARK: &str = "[*]";
const PLAIN_MARK: &str = "[ ]";

/// Text for one frame. Only tiles in `visible` are listed; numbering is
/// 1-based over the whole view so `fav <n>` stays stable while scrolling.
pub fn render(view: &AppViewModel, visible: Range<usize>) -> String {
    let (all_label, favorites_label) = match view.view {
        ViewMode::All => ("<All cats>", " Favorite "),
        ViewMode::Favorites => (" All cats ", "<Favorite>"),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{all_label} {favorites_label}   page {} | {} loaded | {} favorites",
        view.page, view.feed_len, view.favorite_count
    );

    let end = visible.end.min(view.tiles.len());
    let start = visible.start.min(end);
    for (index, tile) in view.tiles[start..end].iter().enumerate() {
        let mark = if tile.favorite {
            FAVORITE_MARK
        } else {
            PLAIN_MARK
        };
        let _ = writeln!(out, "{:>4}. {mark} {}", start + index + 1, tile.image_url);
    }
    if end < view.tiles.len() {
        let _ = writeln!(out, "      ... {} more below", view.tiles.len() - end);
    }

    for notice in [&view.loading_notice, &view.favorites_notice, &view.error]
        .into_iter()
        .flatten()
    {
        let _ = writeln!(out, "{notice}");
    }
    out
}
