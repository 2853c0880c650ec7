use crate::BridgePhase;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub videos: Vec<VideoRowView>,
    pub current_video_url: Option<String>,
    pub phase: BridgePhase,
    pub player_ready: bool,
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    /// Upper bound for a seek slider; never below one second.
    pub seek_max: f64,
    pub last_error: Option<String>,
    pub can_control_playback: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRowView {
    pub index: usize,
    pub url: String,
    pub display_name: String,
    pub thumbnail_url: Option<String>,
    pub is_current: bool,
}

/// Formats seconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
