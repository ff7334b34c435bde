use std::sync::Once;

use gallery_core::{update, AppState, Effect, Item, Msg, PageOutcome, ViewMode};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn with_feed(urls: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            page: 0,
            outcome: PageOutcome::Loaded(urls.iter().map(|url| Item::new(*url)).collect()),
        },
    );
    state
}

fn toggle(state: AppState, identifier: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::FavoriteToggled(identifier.to_string()))
}

#[test]
fn toggle_adds_then_removes() {
    init_logging();
    let urls: Vec<String> = (0..10).map(|i| format!("i{i}")).collect();
    let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let state = with_feed(&refs);

    let (state, effects) = toggle(state, "i3");
    assert!(state.is_favorite("i3"));
    assert_eq!(
        effects,
        vec![Effect::PersistFavorites {
            favorites: vec![Item::new("i3")]
        }]
    );

    let (state, effects) = toggle(state, "i3");
    assert!(!state.is_favorite("i3"));
    assert!(state.favorites().is_empty());
    assert_eq!(effects, vec![Effect::PersistFavorites { favorites: vec![] }]);
}

#[test]
fn toggling_twice_restores_original_set() {
    init_logging();
    let state = with_feed(&["a", "b", "c"]);
    let (state, _) = toggle(state, "a");
    let (state, _) = toggle(state, "c");
    let before = state.favorites().clone();

    let (state, _) = toggle(state, "b");
    let (state, _) = toggle(state, "b");

    assert_eq!(state.favorites(), &before);
}

#[test]
fn unknown_identifier_is_silent_noop() {
    init_logging();
    let (mut state, _) = toggle(with_feed(&["a"]), "a");
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut state, effects) = toggle(state, "not-loaded");

    assert!(effects.is_empty());
    assert!(!state.is_favorite("not-loaded"));
    assert_eq!(state, before);
    assert!(!state.consume_dirty());
}

#[test]
fn favorites_keep_insertion_order() {
    init_logging();
    let state = with_feed(&["a", "b", "c"]);
    let (state, _) = toggle(state, "c");
    let (state, _) = toggle(state, "a");
    let (state, effects) = toggle(state, "b");

    let expected = vec![Item::new("c"), Item::new("a"), Item::new("b")];
    assert_eq!(state.favorites().items(), expected.as_slice());
    assert_eq!(effects, vec![Effect::PersistFavorites { favorites: expected }]);
}

#[test]
fn favorites_survive_feed_failure() {
    init_logging();
    let (state, _) = toggle(with_feed(&["a", "b"]), "a");
    let (state, _) = update(
        state,
        Msg::LayoutMeasured(gallery_core::Viewport::new(0, 600, 100)),
    );
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            page: 1,
            outcome: PageOutcome::Failed,
        },
    );

    assert!(state.feed().is_empty());
    assert!(state.is_favorite("a"));

    // Unfavoriting works even though the item is no longer in the feed.
    let (state, effects) = toggle(state, "a");
    assert!(!state.is_favorite("a"));
    assert_eq!(effects.len(), 1);

    // Re-favoriting does not, since it would fabricate an entry.
    let (state, effects) = toggle(state, "a");
    assert!(!state.is_favorite("a"));
    assert!(effects.is_empty());
}

#[test]
fn restored_favorites_do_not_persist_back() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::FavoritesRestored(vec![Item::new("x"), Item::new("y"), Item::new("x")]),
    );

    assert!(effects.is_empty());
    assert_eq!(state.favorites().len(), 2);
    assert!(state.is_favorite("x"));
}

#[test]
fn restored_favorite_can_be_removed_without_loading() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FavoritesRestored(vec![Item::new("x")]));
    let (state, effects) = toggle(state, "x");

    assert!(state.favorites().is_empty());
    assert_eq!(effects, vec![Effect::PersistFavorites { favorites: vec![] }]);
}

#[test]
fn tiles_reflect_favorite_state_per_view() {
    init_logging();
    let (state, _) = toggle(with_feed(&["a", "b"]), "b");

    let view = state.view();
    assert_eq!(view.view, ViewMode::All);
    let marks: Vec<(&str, bool)> = view
        .tiles
        .iter()
        .map(|tile| (tile.identifier.as_str(), tile.favorite))
        .collect();
    assert_eq!(marks, vec![("a", false), ("b", true)]);
    assert_eq!(view.favorites_notice, None);

    let (state, _) = update(state, Msg::ViewSelected(ViewMode::Favorites));
    let view = state.view();
    assert_eq!(view.tiles.len(), 1);
    assert_eq!(view.tiles[0].image_url, "b");
    assert!(view.tiles[0].favorite);
    assert_eq!(view.favorite_count, 1);
    assert_eq!(view.feed_len, 2);
}

#[test]
fn toggle_works_from_favorites_view() {
    init_logging();
    let (state, _) = toggle(with_feed(&["a"]), "a");
    let (state, _) = update(state, Msg::ViewSelected(ViewMode::Favorites));
    let (state, _) = toggle(state, "a");

    assert!(state.view().tiles.is_empty());
}
