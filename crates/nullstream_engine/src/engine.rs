use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use nullstream_logging::{shell_debug, shell_error};

use crate::oembed::{MetadataFetcher, OEmbedSettings, ReqwestOEmbedFetcher};
use crate::EngineEvent;

/// Receives engine events on the engine's runtime threads.
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
    FetchMetadata { url: String },
    SchedulePlay { generation: u64, delay: Duration },
}

/// Handle to the background thread that owns the tokio runtime.
///
/// Commands are fire-and-forget; results come back through the [`EventSink`].
/// Dropping the handle stops accepting commands.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: OEmbedSettings, sink: Arc<dyn EventSink>) -> Self {
        Self::with_fetcher(Arc::new(ReqwestOEmbedFetcher::new(settings)), sink)
    }

    pub fn with_fetcher(fetcher: Arc<dyn MetadataFetcher>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    shell_error!("Engine runtime failed to start: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, sink.as_ref()).await;
                });
            }
            // Let in-flight fetches and timers finish before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Self { cmd_tx }
    }

    pub fn fetch_metadata(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchMetadata { url: url.into() });
    }

    pub fn schedule_play(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::SchedulePlay { generation, delay });
    }
}

async fn handle_command(fetcher: &dyn MetadataFetcher, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::FetchMetadata { url } => {
            let result = fetcher.fetch(&url).await;
            shell_debug!("oEmbed lookup for {} finished ok={}", url, result.is_ok());
            sink.emit(EngineEvent::MetadataFetched { url, result });
        }
        EngineCommand::SchedulePlay { generation, delay } => {
            tokio::time::sleep(delay).await;
            sink.emit(EngineEvent::PlayDelayElapsed { generation });
        }
    }
}
