//! NullStream core: pure playlist, player bridge and playback state machine.
mod bridge;
mod effect;
mod msg;
mod playback;
mod playlist;
mod state;
mod update;
mod video;
mod video_id;
mod view_model;

pub use bridge::{
    BridgeAction, BridgePhase, PlayerBridge, PlayerCommand, PlayerEvent, DEFAULT_PLAY_DELAY,
    INVALID_URL_ERROR, PLAYING_STATE,
};
pub use effect::Effect;
pub use msg::Msg;
pub use playback::PlaybackState;
pub use playlist::Playlist;
pub use state::AppState;
pub use update::update;
pub use video::{Video, ELLIPSIS, MAX_DISPLAY_TITLE_LEN};
pub use video_id::extract_video_id;
pub use view_model::{format_time, AppViewModel, VideoRowView};
