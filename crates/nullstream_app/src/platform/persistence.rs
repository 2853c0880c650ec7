use std::path::Path;

use nullstream_core::Video;
use nullstream_engine::KeyValueStore;
use nullstream_logging::{shell_error, shell_info, shell_warn};
use serde::{Deserialize, Serialize};

pub(crate) const STORE_FILENAME: &str = "nullstream_state.json";
pub(crate) const PLAYLIST_KEY: &str = "savedVideos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedVideo {
    #[serde(default)]
    id: String,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(
        rename = "thumbnailURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    thumbnail_url: Option<String>,
}

pub(crate) fn playlist_store(data_dir: &Path) -> KeyValueStore {
    KeyValueStore::new(data_dir, STORE_FILENAME)
}

/// Saved playlist, or an empty one if nothing readable was stored.
pub(crate) fn load_playlist(store: &KeyValueStore) -> Vec<Video> {
    let persisted: Vec<PersistedVideo> = match store.get(PLAYLIST_KEY) {
        Ok(Some(videos)) => videos,
        Ok(None) => return Vec::new(),
        Err(err) => {
            shell_warn!(
                "Failed to load playlist from {:?}: {}",
                store.path(),
                err
            );
            return Vec::new();
        }
    };

    let videos: Vec<Video> = persisted
        .into_iter()
        .map(|video| Video {
            url: video.url,
            title: video.title,
            thumbnail_url: video.thumbnail_url,
        })
        .collect();

    shell_info!(
        "Loaded {} saved videos from {:?}",
        videos.len(),
        store.path()
    );
    videos
}

pub(crate) fn save_playlist(store: &KeyValueStore, videos: &[Video]) {
    let persisted: Vec<PersistedVideo> = videos
        .iter()
        .map(|video| PersistedVideo {
            id: video.id().to_string(),
            url: video.url.clone(),
            title: video.title.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
        })
        .collect();

    if let Err(err) = store.set(PLAYLIST_KEY, &persisted) {
        shell_error!("Failed to save playlist to {:?}: {}", store.path(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn titled(url: &str, title: &str) -> Video {
        Video {
            url: url.to_string(),
            title: Some(title.to_string()),
            thumbnail_url: Some(format!("{url}/thumb.jpg")),
        }
    }

    #[test]
    fn playlist_round_trips_in_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = playlist_store(temp.path());
        let videos = vec![
            Video::new("https://youtu.be/b"),
            titled("https://youtu.be/a", "A"),
        ];

        save_playlist(&store, &videos);
        assert_eq!(load_playlist(&store), videos);
    }

    #[test]
    fn stored_shape_uses_the_fixed_key_and_field_names() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = playlist_store(temp.path());
        save_playlist(
            &store,
            &[Video::new("https://youtu.be/b"), titled("https://youtu.be/a", "A")],
        );

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            json!({
                "savedVideos": [
                    {"id": "https://youtu.be/b", "url": "https://youtu.be/b"},
                    {
                        "id": "https://youtu.be/a",
                        "url": "https://youtu.be/a",
                        "title": "A",
                        "thumbnailURL": "https://youtu.be/a/thumb.jpg"
                    }
                ]
            })
        );
    }

    #[test]
    fn missing_or_corrupt_store_loads_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = playlist_store(temp.path());
        assert!(load_playlist(&store).is_empty());

        std::fs::write(store.path(), "[[[").unwrap();
        assert!(load_playlist(&store).is_empty());
    }

    #[test]
    fn entries_without_id_still_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = playlist_store(temp.path());
        std::fs::write(
            store.path(),
            r#"{"savedVideos":[{"url":"https://youtu.be/x","title":null}]}"#,
        )
        .unwrap();

        assert_eq!(load_playlist(&store), vec![Video::new("https://youtu.be/x")]);
    }
}
