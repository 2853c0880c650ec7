use crate::extract_video_id;

/// Titles longer than this many characters are cut for display.
pub const MAX_DISPLAY_TITLE_LEN: usize = 60;
/// Appended to a title that was cut for display.
pub const ELLIPSIS: char = '…';

/// One playlist entry. The url is also the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub url: String,
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl Video {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            thumbnail_url: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.url
    }

    /// Title (capped) if set and non-blank, otherwise the video id, otherwise the raw url.
    pub fn display_name(&self) -> String {
        if let Some(title) = self.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                return truncate_title(title);
            }
        }
        extract_video_id(&self.url).unwrap_or_else(|| self.url.clone())
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_DISPLAY_TITLE_LEN {
        return title.to_string();
    }
    let prefix: String = title.chars().take(MAX_DISPLAY_TITLE_LEN).collect();
    let mut cut = prefix.trim_end().to_string();
    cut.push(ELLIPSIS);
    cut
}
