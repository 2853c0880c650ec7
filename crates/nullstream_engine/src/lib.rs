//! NullStream engine: metadata fetching, timers and local storage.
mod engine;
mod kv_store;
mod oembed;
mod persist;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use kv_store::KeyValueStore;
pub use oembed::{MetadataFetcher, OEmbedSettings, ReqwestOEmbedFetcher, DEFAULT_OEMBED_ENDPOINT};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, FailureKind, FetchError, OEmbedResponse};
