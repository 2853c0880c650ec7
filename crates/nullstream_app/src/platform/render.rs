use nullstream_core::{format_time, AppViewModel, BridgePhase};

pub(crate) fn status_line(view: &AppViewModel) -> String {
    let phase = match view.phase {
        BridgePhase::Unattached => "no player",
        BridgePhase::Attached => "loading player",
        BridgePhase::Ready => "ready",
    };
    let transport = if view.is_playing { "▶" } else { "⏸" };

    let mut line = match &view.current_video_url {
        Some(url) => format!(
            "[{phase}] {transport} {} / {}  {url}",
            format_time(view.current_time),
            format_time(view.duration)
        ),
        None => format!("[{phase}] nothing loaded"),
    };
    if let Some(err) = &view.last_error {
        line.push_str(&format!("  error: {err}"));
    }
    line
}

pub(crate) fn playlist_lines(view: &AppViewModel) -> Vec<String> {
    if view.videos.is_empty() {
        return vec!["Playlist is empty; use 'add <url>'".to_string()];
    }
    view.videos
        .iter()
        .map(|row| {
            let marker = if row.is_current { '*' } else { ' ' };
            format!("{marker}{:>3}. {}", row.index + 1, row.display_name)
        })
        .collect()
}

/// Lines worth printing after a state change. Time ticks alone print nothing.
pub(crate) fn changes(previous: &AppViewModel, next: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if previous.videos != next.videos {
        lines.extend(playlist_lines(next));
    }
    let status_changed = previous.phase != next.phase
        || previous.is_playing != next.is_playing
        || previous.current_video_url != next.current_video_url
        || previous.last_error != next.last_error;
    if status_changed {
        lines.push(status_line(next));
    }
    lines
}
