use nullstream_core::extract_video_id;

#[test]
fn watch_urls_yield_the_v_parameter() {
    assert_eq!(
        extract_video_id("https://youtube.com/watch?v=abc123"),
        Some("abc123".to_string())
    );
    assert_eq!(
        extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123"),
        Some("dQw4w9WgXcQ".to_string())
    );
}

#[test]
fn short_links_stop_at_the_query() {
    assert_eq!(
        extract_video_id("https://youtu.be/xyz987?t=5"),
        Some("xyz987".to_string())
    );
}

#[test]
fn embed_and_shorts_forms_are_supported() {
    assert_eq!(
        extract_video_id("https://www.youtube.com/embed/emb42/extra"),
        Some("emb42".to_string())
    );
    assert_eq!(
        extract_video_id("https://youtube.com/shorts/sh0rt?feature=share"),
        Some("sh0rt".to_string())
    );
}

#[test]
fn scheme_is_optional() {
    assert_eq!(
        extract_video_id("youtu.be/noScheme"),
        Some("noScheme".to_string())
    );
}

#[test]
fn non_youtube_input_yields_none() {
    for input in [
        "not a url",
        "",
        "https://vimeo.com/12345",
        "https://youtube.com/watch?list=PL123",
        "https://youtube.com/shorts/",
    ] {
        assert_eq!(extract_video_id(input), None, "input: {input:?}");
    }
}
