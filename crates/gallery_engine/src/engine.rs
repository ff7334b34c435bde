use std::sync::{mpsc, Arc};
use std::thread;

use gallery_logging::{gallery_info, gallery_warn};
use thiserror::Error;

use crate::fetch::FeedSource;
use crate::{EngineEvent, PageIndex};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("engine worker has stopped")]
    Stopped,
}

/// Receiver of engine events. Called from the worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    FetchPage { page: PageIndex },
}

/// Handle to the background page worker.
///
/// Commands run strictly in order on a single-threaded runtime, so at most
/// one page request is on the wire at any time.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn FeedSource>, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("gallery-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.block_on(handle_command(source.as_ref(), sink.as_ref(), command));
                }
                gallery_info!("Engine worker exiting");
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self { cmd_tx })
    }

    pub fn request_page(&self, page: PageIndex) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::FetchPage { page })
            .map_err(|_| EngineError::Stopped)
    }
}

async fn handle_command(source: &dyn FeedSource, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::FetchPage { page } => {
            let result = source.fetch_page(page).await;
            if let Err(err) = &result {
                gallery_warn!("Page {} failed: {}", page, err);
            }
            sink.emit(EngineEvent::PageFetched { page, result });
        }
    }
}
