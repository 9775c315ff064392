use vibecheck::utils::*;

#[test]
fn test_extract_user_id_from_profile_url() {
    assert_eq!(
        extract_user_id("https://open.spotify.com/user/abc123"),
        "abc123"
    );

    // Query strings and trailing paths are not part of the id
    assert_eq!(
        extract_user_id("https://open.spotify.com/user/abc123?si=xyz"),
        "abc123"
    );
    assert_eq!(
        extract_user_id("open.spotify.com/user/Someone42/playlists"),
        "Someone42"
    );
}

#[test]
fn test_extract_user_id_returns_other_input_unchanged() {
    assert_eq!(extract_user_id("abc123"), "abc123");
    assert_eq!(extract_user_id("  spaced id "), "  spaced id ");
    assert_eq!(
        extract_user_id("https://example.com/user/abc123"),
        "https://example.com/user/abc123"
    );
    assert_eq!(extract_user_id(""), "");
}

#[test]
fn test_generate_anti_forgery_token() {
    let token = generate_anti_forgery_token();

    // 16 bytes in unpadded base64
    assert_eq!(token.len(), 22);
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    assert_ne!(token, generate_anti_forgery_token());
}

#[test]
fn test_generate_session_id() {
    let id = generate_session_id();

    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(id, generate_session_id());
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html("<b>\"rock\" & 'roll'</b>"),
        "&lt;b&gt;&quot;rock&quot; &amp; &#39;roll&#39;&lt;/b&gt;"
    );
    assert_eq!(escape_html("hyperpop"), "hyperpop");
}
