use crate::{PlayerEvent, Video};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The web view hosting the player page was created.
    WebViewAttached,
    /// The web view was destroyed.
    WebViewDetached,
    /// Raw IPC body posted by the player page.
    BridgeMessage(String),
    /// Already-decoded player event.
    PlayerEvent(PlayerEvent),
    /// Fallback timer for a load's follow-up play fired.
    PlayDelayElapsed { generation: u64 },
    PlayClicked,
    PauseClicked,
    TogglePlayPause,
    SeekRequested(f64),
    /// User picked a video to play.
    LoadVideo(String),
    /// User submitted the add-URL form.
    AddUrlSubmitted(String),
    RemoveVideo(String),
    RemoveAt(Vec<usize>),
    /// Restore the saved playlist at startup.
    RestorePlaylist(Vec<Video>),
    MetadataFetched {
        url: String,
        title: Option<String>,
        thumbnail_url: Option<String>,
    },
    /// Metadata lookup failed; the entry keeps its current fields.
    MetadataUnavailable { url: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
