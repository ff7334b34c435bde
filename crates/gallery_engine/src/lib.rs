//! Gallery engine: remote feed source, page worker and key-value storage.
mod engine;
mod fetch;
mod persist;
mod store;
mod types;

pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fetch::{CatApiSource, FeedSource, FetchSettings};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use store::{FileKvStore, KeyValueStore, MemoryKvStore, StoreError, MAX_KEY_LENGTH};
pub use types::{CatImage, EngineEvent, FailureKind, FetchError, PageIndex};
