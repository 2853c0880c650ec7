use crate::{AppState, Effect, Msg, PlayerEvent};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::WebViewAttached => state.attach_player(),
        Msg::WebViewDetached => state.detach_player(),
        Msg::BridgeMessage(raw) => match PlayerEvent::parse(&raw) {
            Some(event) => state.apply_player_event(event),
            // Unknown events and malformed bodies are dropped without a trace.
            None => Vec::new(),
        },
        Msg::PlayerEvent(event) => state.apply_player_event(event),
        Msg::PlayDelayElapsed { generation } => state.play_delay_elapsed(generation),
        Msg::PlayClicked => state.play(),
        Msg::PauseClicked => state.pause(),
        Msg::TogglePlayPause => state.toggle_play_pause(),
        Msg::SeekRequested(seconds) => state.seek(seconds),
        Msg::LoadVideo(url) => state.load_video(url),
        Msg::AddUrlSubmitted(raw) => state.add_url(&raw),
        Msg::RemoveVideo(url) => state.remove_url(&url),
        Msg::RemoveAt(offsets) => state.remove_offsets(&offsets),
        Msg::RestorePlaylist(videos) => state.restore_playlist(videos),
        Msg::MetadataFetched {
            url,
            title,
            thumbnail_url,
        } => state.apply_metadata(&url, title, thumbnail_url),
        Msg::MetadataUnavailable { .. } | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
