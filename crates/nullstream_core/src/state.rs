use std::time::Duration;

use crate::view_model::{AppViewModel, VideoRowView};
use crate::{
    BridgeAction, BridgePhase, Effect, PlaybackState, PlayerBridge, PlayerEvent, Playlist, Video,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    playlist: Playlist,
    bridge: PlayerBridge,
    playback: PlaybackState,
    current_video_url: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_play_delay(play_delay: Duration) -> Self {
        Self {
            bridge: PlayerBridge::with_play_delay(play_delay),
            ..Self::default()
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn bridge(&self) -> &PlayerBridge {
        &self.bridge
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn current_video_url(&self) -> Option<&str> {
        self.current_video_url.as_deref()
    }

    pub fn can_control_playback(&self) -> bool {
        self.playback.ready && self.current_video_url.is_some()
    }

    pub fn view(&self) -> AppViewModel {
        let videos = self
            .playlist
            .videos()
            .iter()
            .enumerate()
            .map(|(index, video)| VideoRowView {
                index,
                url: video.url.clone(),
                display_name: video.display_name(),
                thumbnail_url: video.thumbnail_url.clone(),
                is_current: self.current_video_url.as_deref() == Some(video.url.as_str()),
            })
            .collect();

        AppViewModel {
            videos,
            current_video_url: self.current_video_url.clone(),
            phase: self.bridge.phase(),
            player_ready: self.playback.ready,
            is_playing: self.playback.playing,
            current_time: self.playback.current_time,
            duration: self.playback.duration,
            seek_max: self.playback.duration.max(1.0),
            last_error: self.playback.last_error.clone(),
            can_control_playback: self.can_control_playback(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn attach_player(&mut self) -> Vec<Effect> {
        self.bridge.attach();
        self.mark_dirty();
        Vec::new()
    }

    pub(crate) fn detach_player(&mut self) -> Vec<Effect> {
        self.bridge.detach(self.current_video_url.as_deref());
        self.playback.ready = false;
        self.playback.playing = false;
        self.mark_dirty();
        Vec::new()
    }

    pub(crate) fn apply_player_event(&mut self, event: PlayerEvent) -> Vec<Effect> {
        if event == PlayerEvent::Ready && self.bridge.phase() == BridgePhase::Unattached {
            return Vec::new();
        }
        self.playback.apply(&event);
        self.mark_dirty();
        let actions = self.bridge.handle_event(&event);
        self.run_bridge_actions(actions)
    }

    pub(crate) fn play_delay_elapsed(&mut self, generation: u64) -> Vec<Effect> {
        let actions = self.bridge.play_delay_elapsed(generation);
        self.run_bridge_actions(actions)
    }

    pub(crate) fn play(&mut self) -> Vec<Effect> {
        let actions = self.bridge.play();
        self.run_bridge_actions(actions)
    }

    pub(crate) fn pause(&mut self) -> Vec<Effect> {
        let actions = self.bridge.pause();
        self.run_bridge_actions(actions)
    }

    pub(crate) fn toggle_play_pause(&mut self) -> Vec<Effect> {
        if self.playback.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Updates the local time first so the UI does not jump back while the
    /// player catches up.
    pub(crate) fn seek(&mut self, seconds: f64) -> Vec<Effect> {
        if !seconds.is_finite() {
            return Vec::new();
        }
        self.playback.current_time = seconds;
        self.mark_dirty();
        let actions = self.bridge.seek(seconds);
        self.run_bridge_actions(actions)
    }

    pub(crate) fn load_video(&mut self, url: String) -> Vec<Effect> {
        self.playback.last_error = None;
        let actions = self.bridge.load_video(&url);
        self.current_video_url = Some(url);
        self.mark_dirty();
        self.run_bridge_actions(actions)
    }

    pub(crate) fn add_url(&mut self, raw: &str) -> Vec<Effect> {
        let url = raw.trim();
        if url.is_empty() {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.playlist.add(url) {
            effects.push(self.persist_effect());
        }
        effects.extend(self.load_video(url.to_string()));
        let needs_metadata = self
            .playlist
            .get(url)
            .is_some_and(|video| video.title.is_none());
        if needs_metadata {
            effects.push(Effect::FetchMetadata {
                url: url.to_string(),
            });
        }
        effects
    }

    pub(crate) fn remove_url(&mut self, url: &str) -> Vec<Effect> {
        if self.playlist.remove(url) {
            vec![self.persist_effect()]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn remove_offsets(&mut self, offsets: &[usize]) -> Vec<Effect> {
        if self.playlist.remove_at(offsets) {
            vec![self.persist_effect()]
        } else {
            Vec::new()
        }
    }

    /// Replaces the playlist and requests metadata for every entry without a title.
    pub(crate) fn restore_playlist(&mut self, videos: Vec<Video>) -> Vec<Effect> {
        self.playlist = Playlist::from_videos(videos);
        self.mark_dirty();
        self.playlist
            .urls_needing_metadata()
            .into_iter()
            .map(|url| Effect::FetchMetadata { url })
            .collect()
    }

    pub(crate) fn apply_metadata(
        &mut self,
        url: &str,
        title: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Vec<Effect> {
        if self.playlist.update_metadata(url, title, thumbnail_url) {
            vec![self.persist_effect()]
        } else {
            Vec::new()
        }
    }

    fn persist_effect(&mut self) -> Effect {
        self.mark_dirty();
        Effect::PersistPlaylist(self.playlist.videos().to_vec())
    }

    fn run_bridge_actions(&mut self, actions: Vec<BridgeAction>) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                BridgeAction::Run(command) => effects.push(Effect::Player(command)),
                BridgeAction::SchedulePlay { generation, delay } => {
                    effects.push(Effect::SchedulePlay { generation, delay });
                }
                BridgeAction::Emit(event) => {
                    self.playback.apply(&event);
                    self.mark_dirty();
                }
            }
        }
        effects
    }
}
