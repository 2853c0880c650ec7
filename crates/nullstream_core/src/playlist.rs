use std::collections::{BTreeSet, HashSet};

use crate::Video;

/// Ordered list of videos with unique urls.
///
/// Every mutating method reports whether the list actually changed so the caller
/// knows when a save is due.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Playlist {
    videos: Vec<Video>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a playlist from previously saved entries, keeping the first entry for
    /// any duplicated url.
    pub fn from_videos(videos: Vec<Video>) -> Self {
        let mut seen = HashSet::new();
        let videos = videos
            .into_iter()
            .filter(|video| seen.insert(video.url.clone()))
            .collect();
        Self { videos }
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&Video> {
        self.videos.iter().find(|video| video.url == url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Appends `url` (trimmed) unless it is blank or already present.
    pub fn add(&mut self, url: &str) -> bool {
        let trimmed = url.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.videos.push(Video::new(trimmed));
        true
    }

    /// Overwrites title (trimmed) and thumbnail of the entry for `url`, if any.
    pub fn update_metadata(
        &mut self,
        url: &str,
        title: Option<String>,
        thumbnail_url: Option<String>,
    ) -> bool {
        let Some(video) = self.videos.iter_mut().find(|video| video.url == url) else {
            return false;
        };
        video.title = title.map(|t| t.trim().to_string());
        video.thumbnail_url = thumbnail_url;
        true
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.videos.len();
        self.videos.retain(|video| video.url != url);
        self.videos.len() != before
    }

    /// Removes the entries at the given offsets. Out-of-range offsets are ignored.
    pub fn remove_at(&mut self, offsets: &[usize]) -> bool {
        let offsets: BTreeSet<usize> = offsets
            .iter()
            .copied()
            .filter(|&offset| offset < self.videos.len())
            .collect();
        if offsets.is_empty() {
            return false;
        }
        let mut index = 0;
        self.videos.retain(|_| {
            let keep = !offsets.contains(&index);
            index += 1;
            keep
        });
        true
    }

    /// Urls of entries that never received a title.
    pub fn urls_needing_metadata(&self) -> Vec<String> {
        self.videos
            .iter()
            .filter(|video| video.title.is_none())
            .map(|video| video.url.clone())
            .collect()
    }
}
