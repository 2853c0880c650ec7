//! Bridge between native state and the embedded IFrame player.
//!
//! Outbound, the bridge turns commands into one-shot scripts. Inbound, it parses
//! `{event, value}` messages posted by the player page into [`PlayerEvent`]s. It
//! tracks whether a web view is attached and ready, buffers one load requested
//! before readiness, and owns the pending play that follows a programmatic load.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::extract_video_id;

/// IFrame API state code for "playing". Every other code means not playing.
pub const PLAYING_STATE: i64 = 1;
/// Fallback wait between a programmatic load and the play that follows it.
pub const DEFAULT_PLAY_DELAY: Duration = Duration::from_millis(1200);
pub const INVALID_URL_ERROR: &str = "Invalid YouTube URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgePhase {
    /// No web view exists; loads are buffered.
    #[default]
    Unattached,
    /// Web view exists but the player page has not reported `ready`.
    Attached,
    /// Player accepts commands directly.
    Ready,
}

/// Event posted by the player page.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready,
    /// The player accepted a programmatic load.
    Loaded,
    State(i64),
    Time(f64),
    Duration(f64),
    Error(String),
}

#[derive(Debug, Deserialize)]
struct BridgeMessage {
    event: String,
    #[serde(default)]
    value: Value,
}

impl PlayerEvent {
    /// Parses a raw `{"event": ..., "value": ...}` message body.
    ///
    /// Malformed bodies, unknown event names and values of the wrong type all
    /// yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let message: BridgeMessage = serde_json::from_str(raw).ok()?;
        Self::from_parts(&message.event, &message.value)
    }

    fn from_parts(event: &str, value: &Value) -> Option<Self> {
        match event {
            "ready" => Some(Self::Ready),
            "loaded" => Some(Self::Loaded),
            "state" => value.as_i64().map(Self::State),
            "time" => value.as_f64().map(Self::Time),
            "duration" => value.as_f64().map(Self::Duration),
            "error" => value.as_str().map(|err| Self::Error(err.to_string())),
            _ => None,
        }
    }
}

/// Command sent to the player page.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    LoadById(String),
    Play,
    Pause,
    SeekTo(f64),
}

impl PlayerCommand {
    /// Script evaluated in the web view. The result is discarded.
    pub fn script(&self) -> String {
        let call = match self {
            Self::LoadById(video_id) => {
                // JSON string literal doubles as a safely quoted JS string.
                format!("appPlayer.loadVideoById({})", Value::from(video_id.as_str()))
            }
            Self::Play => "appPlayer.playVideo()".to_string(),
            Self::Pause => "appPlayer.pauseVideo()".to_string(),
            Self::SeekTo(seconds) => format!("appPlayer.seekTo({seconds})"),
        };
        format!("(function(){{ {call}; return null; }})()")
    }
}

/// What the caller must do on the bridge's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeAction {
    Run(PlayerCommand),
    /// Report back with `generation` once `delay` has elapsed.
    SchedulePlay { generation: u64, delay: Duration },
    /// Feed this event into the playback state as if the player had sent it.
    Emit(PlayerEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBridge {
    phase: BridgePhase,
    pending_load: Option<String>,
    pending_play: Option<u64>,
    last_generation: u64,
    play_delay: Duration,
}

impl Default for PlayerBridge {
    fn default() -> Self {
        Self::with_play_delay(DEFAULT_PLAY_DELAY)
    }
}

impl PlayerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_play_delay(play_delay: Duration) -> Self {
        Self {
            phase: BridgePhase::Unattached,
            pending_load: None,
            pending_play: None,
            last_generation: 0,
            play_delay,
        }
    }

    pub fn phase(&self) -> BridgePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == BridgePhase::Ready
    }

    pub fn pending_load(&self) -> Option<&str> {
        self.pending_load.as_deref()
    }

    pub fn pending_play(&self) -> Option<u64> {
        self.pending_play
    }

    pub fn play_delay(&self) -> Duration {
        self.play_delay
    }

    /// A web view was created. Readiness still has to be reported by the page.
    pub fn attach(&mut self) {
        if self.phase == BridgePhase::Unattached {
            self.phase = BridgePhase::Attached;
        }
    }

    /// The web view went away. `resume_url` is buffered so the next attachment
    /// picks up where this one left off.
    pub fn detach(&mut self, resume_url: Option<&str>) {
        self.phase = BridgePhase::Unattached;
        self.pending_play = None;
        if let Some(url) = resume_url.filter(|url| extract_video_id(url).is_some()) {
            self.pending_load = Some(url.to_string());
        }
    }

    pub fn load_video(&mut self, url: &str) -> Vec<BridgeAction> {
        let Some(video_id) = extract_video_id(url) else {
            return vec![BridgeAction::Emit(PlayerEvent::Error(
                INVALID_URL_ERROR.to_string(),
            ))];
        };
        if !self.is_ready() {
            self.pending_load = Some(url.to_string());
            return Vec::new();
        }

        self.last_generation += 1;
        self.pending_play = Some(self.last_generation);
        vec![
            BridgeAction::Run(PlayerCommand::LoadById(video_id)),
            BridgeAction::SchedulePlay {
                generation: self.last_generation,
                delay: self.play_delay,
            },
        ]
    }

    pub fn play(&mut self) -> Vec<BridgeAction> {
        self.run_when_ready(PlayerCommand::Play)
    }

    /// Pausing also drops any play still pending from a load.
    pub fn pause(&mut self) -> Vec<BridgeAction> {
        self.pending_play = None;
        self.run_when_ready(PlayerCommand::Pause)
    }

    pub fn seek(&mut self, seconds: f64) -> Vec<BridgeAction> {
        self.run_when_ready(PlayerCommand::SeekTo(seconds))
    }

    pub fn handle_event(&mut self, event: &PlayerEvent) -> Vec<BridgeAction> {
        match event {
            // No runtime to be ready; a late message from a destroyed page.
            PlayerEvent::Ready if self.phase == BridgePhase::Unattached => Vec::new(),
            PlayerEvent::Ready => {
                self.phase = BridgePhase::Ready;
                // Clear the slot before loading so the load cannot re-buffer itself.
                match self.pending_load.take() {
                    Some(url) => self.load_video(&url),
                    None => Vec::new(),
                }
            }
            PlayerEvent::Loaded => match self.pending_play.take() {
                Some(_) => self.play(),
                None => Vec::new(),
            },
            PlayerEvent::State(code) if *code == PLAYING_STATE => {
                self.pending_play = None;
                Vec::new()
            }
            PlayerEvent::State(_)
            | PlayerEvent::Time(_)
            | PlayerEvent::Duration(_)
            | PlayerEvent::Error(_) => Vec::new(),
        }
    }

    /// The fallback timer for `generation` fired. Stale generations are ignored.
    pub fn play_delay_elapsed(&mut self, generation: u64) -> Vec<BridgeAction> {
        if self.pending_play != Some(generation) {
            return Vec::new();
        }
        self.pending_play = None;
        self.play()
    }

    fn run_when_ready(&self, command: PlayerCommand) -> Vec<BridgeAction> {
        if self.is_ready() {
            vec![BridgeAction::Run(command)]
        } else {
            Vec::new()
        }
    }
}
