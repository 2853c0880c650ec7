use nullstream_core::{Effect, Msg};
use nullstream_engine::{EngineEvent, EngineHandle, EventSink, KeyValueStore};
use nullstream_logging::{shell_debug, shell_info, shell_warn};

use super::persistence;
use super::webview::ScriptHost;

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    store: KeyValueStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: KeyValueStore) -> Self {
        Self { engine, store }
    }

    pub fn run(&self, effects: Vec<Effect>, host: &dyn ScriptHost) {
        for effect in effects {
            match effect {
                Effect::Player(command) => {
                    shell_debug!("Player command {:?}", command);
                    if let Err(err) = host.run_script(&command.script()) {
                        shell_warn!("Script for {:?} was not delivered: {}", command, err);
                    }
                }
                Effect::SchedulePlay { generation, delay } => {
                    self.engine.schedule_play(generation, delay);
                }
                Effect::FetchMetadata { url } => {
                    shell_info!("FetchMetadata url={}", url);
                    self.engine.fetch_metadata(url);
                }
                Effect::PersistPlaylist(videos) => {
                    persistence::save_playlist(&self.store, &videos);
                }
            }
        }
    }
}

/// Forwards engine events as messages through `forward`.
pub(crate) struct MsgSink<F> {
    forward: F,
}

impl<F> MsgSink<F>
where
    F: Fn(Msg) + Send + Sync,
{
    pub fn new(forward: F) -> Self {
        Self { forward }
    }
}

impl<F> EventSink for MsgSink<F>
where
    F: Fn(Msg) + Send + Sync,
{
    fn emit(&self, event: EngineEvent) {
        (self.forward)(engine_event_to_msg(event));
    }
}

/// Metadata failures are logged and otherwise treated as "no metadata yet".
pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::MetadataFetched {
            url,
            result: Ok(meta),
        } => Msg::MetadataFetched {
            url,
            title: meta.title,
            thumbnail_url: meta.thumbnail_url,
        },
        EngineEvent::MetadataFetched {
            url,
            result: Err(err),
        } => {
            shell_warn!("Metadata lookup for {} failed: {}", url, err);
            Msg::MetadataUnavailable { url }
        }
        EngineEvent::PlayDelayElapsed { generation } => Msg::PlayDelayElapsed { generation },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::{mpsc, Arc};

    use nullstream_core::{PlayerCommand, Video};
    use nullstream_engine::{ChannelEventSink, FailureKind, FetchError, OEmbedResponse, OEmbedSettings};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        scripts: RefCell<Vec<String>>,
    }

    impl ScriptHost for RecordingHost {
        fn run_script(&self, script: &str) -> anyhow::Result<()> {
            self.scripts.borrow_mut().push(script.to_string());
            Ok(())
        }
    }

    fn runner(dir: &std::path::Path) -> EffectRunner {
        let (tx, _rx) = mpsc::channel();
        let engine = EngineHandle::new(OEmbedSettings::default(), Arc::new(ChannelEventSink::new(tx)));
        EffectRunner::new(engine, persistence::playlist_store(dir))
    }

    #[test]
    fn player_effects_become_scripts_and_playlists_are_saved() {
        let temp = tempfile::TempDir::new().unwrap();
        let runner = runner(temp.path());
        let host = RecordingHost::default();

        runner.run(
            vec![
                Effect::Player(PlayerCommand::Pause),
                Effect::PersistPlaylist(vec![Video::new("https://youtu.be/a")]),
            ],
            &host,
        );

        assert_eq!(
            *host.scripts.borrow(),
            vec![PlayerCommand::Pause.script()]
        );
        let store = persistence::playlist_store(temp.path());
        assert_eq!(
            persistence::load_playlist(&store),
            vec![Video::new("https://youtu.be/a")]
        );
    }

    #[test]
    fn engine_events_map_to_messages() {
        let ok = engine_event_to_msg(EngineEvent::MetadataFetched {
            url: "u".to_string(),
            result: Ok(OEmbedResponse {
                title: Some("T".to_string()),
                thumbnail_url: Some("t.jpg".to_string()),
                ..OEmbedResponse::default()
            }),
        });
        assert_eq!(
            ok,
            Msg::MetadataFetched {
                url: "u".to_string(),
                title: Some("T".to_string()),
                thumbnail_url: Some("t.jpg".to_string()),
            }
        );

        let failed = engine_event_to_msg(EngineEvent::MetadataFetched {
            url: "u".to_string(),
            result: Err(FetchError {
                kind: FailureKind::Network,
                message: "offline".to_string(),
            }),
        });
        assert_eq!(failed, Msg::MetadataUnavailable { url: "u".to_string() });

        assert_eq!(
            engine_event_to_msg(EngineEvent::PlayDelayElapsed { generation: 7 }),
            Msg::PlayDelayElapsed { generation: 7 }
        );
    }

    #[test]
    fn msg_sink_forwards_mapped_events() {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let sink = MsgSink::new(move |msg| {
            let _ = tx.lock().unwrap().send(msg);
        });

        sink.emit(EngineEvent::PlayDelayElapsed { generation: 3 });
        assert_eq!(rx.recv().unwrap(), Msg::PlayDelayElapsed { generation: 3 });
    }
}
