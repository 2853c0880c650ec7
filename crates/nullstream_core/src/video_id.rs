use std::sync::LazyLock;

use regex::Regex;

/// Tried in order; the first pattern that matches wins.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&?/]+)")
            .expect("watch/short-link/embed pattern"),
        Regex::new(r"youtube\.com/shorts/([^&?/]+)").expect("shorts pattern"),
    ]
});

/// Extracts the YouTube video id from a watch, `youtu.be`, embed or shorts URL.
///
/// Returns `None` for anything that does not look like one of those forms. The
/// search is unanchored, so surrounding text and a missing scheme are tolerated.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
    })
}
