use std::sync::mpsc;

use gallery_core::{Effect, Item, Msg, PageOutcome};
use gallery_engine::{CatImage, EngineEvent, EngineHandle, EventSink, KeyValueStore};
use gallery_logging::{gallery_error, gallery_info};

use crate::app::AppEvent;
use crate::persistence;

/// Executes effects produced by `update` against the engine and the store.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Box<dyn KeyValueStore>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: Box<dyn KeyValueStore>) -> Self {
        Self { engine, store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Runs `effects` in order. Returns messages that must be dispatched
    /// immediately, e.g. a failure for a page the engine could not accept.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::RequestPage { page } => {
                    gallery_info!("RequestPage page={}", page);
                    if let Err(err) = self.engine.request_page(page) {
                        gallery_error!("Could not request page {}: {}", page, err);
                        follow_ups.push(Msg::PageLoaded {
                            page,
                            outcome: PageOutcome::Failed,
                        });
                    }
                }
                Effect::PersistFavorites { favorites } => {
                    gallery_info!("PersistFavorites count={}", favorites.len());
                    persistence::save_favorites(self.store.as_mut(), &favorites);
                }
            }
        }
        follow_ups
    }
}

/// Forwards engine events into the application's event channel.
pub struct AppEventSink {
    tx: mpsc::Sender<AppEvent>,
}

impl AppEventSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for AppEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Core(page_loaded(event)));
    }
}

pub(crate) fn page_loaded(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { page, result } => Msg::PageLoaded {
            page,
            outcome: match result {
                Ok(images) => PageOutcome::Loaded(images.into_iter().map(to_item).collect()),
                Err(_) => PageOutcome::Failed,
            },
        },
    }
}

fn to_item(image: CatImage) -> Item {
    Item {
        url: image.url,
        id: (!image.id.is_empty()).then_some(image.id),
        width: image.width,
        height: image.height,
    }
}
