use crate::{PlayerEvent, PLAYING_STATE};

/// Playback as last reported by the player. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub ready: bool,
    pub playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub last_error: Option<String>,
}

impl PlaybackState {
    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Ready => self.ready = true,
            PlayerEvent::State(code) => self.playing = *code == PLAYING_STATE,
            PlayerEvent::Time(seconds) => self.current_time = *seconds,
            PlayerEvent::Duration(seconds) => self.duration = *seconds,
            PlayerEvent::Error(err) => self.last_error = Some(err.clone()),
            PlayerEvent::Loaded => {}
        }
    }
}
