use nullstream_core::{Playlist, Video, ELLIPSIS, MAX_DISPLAY_TITLE_LEN};

#[test]
fn add_trims_and_ignores_blank_and_duplicates() {
    let mut playlist = Playlist::new();

    assert!(playlist.add("  https://youtu.be/a  "));
    assert!(!playlist.add("https://youtu.be/a"));
    assert!(!playlist.add("\t https://youtu.be/a\n"));
    assert!(!playlist.add("   "));

    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist.videos()[0], Video::new("https://youtu.be/a"));
}

#[test]
fn remove_then_add_restores_a_fresh_entry() {
    let mut playlist = Playlist::new();
    playlist.add("https://youtu.be/a");
    playlist.update_metadata(
        "https://youtu.be/a",
        Some("A title".to_string()),
        Some("https://i.ytimg.com/a.jpg".to_string()),
    );

    assert!(playlist.remove("https://youtu.be/a"));
    assert!(playlist.is_empty());
    assert!(playlist.add("https://youtu.be/a"));

    let video = playlist.get("https://youtu.be/a").unwrap();
    assert_eq!(video.title, None);
    assert_eq!(video.thumbnail_url, None);
}

#[test]
fn update_metadata_for_unknown_url_is_noop() {
    let mut playlist = Playlist::new();
    playlist.add("https://youtu.be/a");
    let before = playlist.clone();

    assert!(!playlist.update_metadata("https://youtu.be/zzz", Some("x".to_string()), None));
    assert_eq!(playlist, before);
}

#[test]
fn update_metadata_trims_title_and_overwrites_thumbnail() {
    let mut playlist = Playlist::new();
    playlist.add("https://youtu.be/a");
    playlist.update_metadata(
        "https://youtu.be/a",
        Some("Old".to_string()),
        Some("old.jpg".to_string()),
    );

    assert!(playlist.update_metadata("https://youtu.be/a", Some("  New title \n".to_string()), None));
    let video = playlist.get("https://youtu.be/a").unwrap();
    assert_eq!(video.title.as_deref(), Some("New title"));
    assert_eq!(video.thumbnail_url, None);
}

#[test]
fn remove_at_drops_every_offset_and_ignores_out_of_range() {
    let mut playlist = Playlist::new();
    for url in ["u0", "u1", "u2", "u3"] {
        playlist.add(url);
    }

    assert!(playlist.remove_at(&[3, 1, 1, 99]));
    let urls: Vec<_> = playlist.videos().iter().map(|v| v.url.as_str()).collect();
    assert_eq!(urls, vec!["u0", "u2"]);

    assert!(!playlist.remove_at(&[5]));
    assert!(!playlist.remove("u9"));
}

#[test]
fn urls_needing_metadata_lists_untitled_entries_in_order() {
    let mut playlist = Playlist::new();
    playlist.add("u0");
    playlist.add("u1");
    playlist.add("u2");
    playlist.update_metadata("u1", Some("Titled".to_string()), None);

    assert_eq!(playlist.urls_needing_metadata(), vec!["u0", "u2"]);
}

#[test]
fn restored_duplicates_keep_the_first_entry() {
    let mut first = Video::new("u0");
    first.title = Some("first".to_string());
    let playlist = Playlist::from_videos(vec![first.clone(), Video::new("u1"), Video::new("u0")]);

    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist.videos()[0], first);
}

#[test]
fn display_name_prefers_trimmed_title() {
    let mut video = Video::new("https://youtu.be/abc");
    video.title = Some("  A short title  ".to_string());
    assert_eq!(video.display_name(), "A short title");
}

#[test]
fn display_name_falls_back_to_id_then_url() {
    let mut video = Video::new("https://youtu.be/abc");
    video.title = Some("   ".to_string());
    assert_eq!(video.display_name(), "abc");

    let raw = Video::new("my bookmark");
    assert_eq!(raw.display_name(), "my bookmark");
}

#[test]
fn display_name_truncates_long_titles() {
    let exact = "x".repeat(MAX_DISPLAY_TITLE_LEN);
    let mut video = Video::new("https://youtu.be/abc");
    video.title = Some(exact.clone());
    assert_eq!(video.display_name(), exact);

    let long = format!("{} tail", "y".repeat(MAX_DISPLAY_TITLE_LEN));
    video.title = Some(long);
    let expected = format!("{}{}", "y".repeat(MAX_DISPLAY_TITLE_LEN), ELLIPSIS);
    assert_eq!(video.display_name(), expected);
}

#[test]
fn truncation_counts_characters_and_trims_the_cut() {
    // 59 chars then a space at position 60: the cut ends in whitespace.
    let title = format!("{} é and more", "é".repeat(MAX_DISPLAY_TITLE_LEN - 1));
    let mut video = Video::new("https://youtu.be/abc");
    video.title = Some(title);

    let expected = format!("{}{}", "é".repeat(MAX_DISPLAY_TITLE_LEN - 1), ELLIPSIS);
    assert_eq!(video.display_name(), expected);
}
