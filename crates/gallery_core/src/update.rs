use crate::{AppState, Effect, Msg, PageOutcome, SCROLL_THRESHOLD_PX};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => match state.start() {
            Some(page) => vec![Effect::RequestPage { page }],
            None => Vec::new(),
        },
        Msg::FavoritesRestored(items) => {
            // Seeding from the store must not write the store back.
            state.restore_favorites(items);
            Vec::new()
        }
        Msg::Scrolled(viewport) => {
            if state.can_load_more() && viewport.is_near_bottom(SCROLL_THRESHOLD_PX) {
                advance(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::LayoutMeasured(viewport) => {
            if state.can_load_more() && viewport.is_underfilled() {
                advance(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded { page, outcome } => {
            let batch = match outcome {
                PageOutcome::Loaded(items) => Some(items),
                PageOutcome::Failed => None,
            };
            state.complete_page(page, batch);
            Vec::new()
        }
        Msg::ViewSelected(view) => {
            state.set_view(view);
            Vec::new()
        }
        Msg::FavoriteToggled(identifier) => {
            if state.toggle_favorite(&identifier) {
                vec![Effect::PersistFavorites {
                    favorites: state.favorites().items().to_vec(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn advance(state: &mut AppState) -> Vec<Effect> {
    let page = state.advance_page();
    vec![Effect::RequestPage { page }]
}
