use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

static PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"spotify\.com/user/([a-zA-Z0-9]+)").expect("profile url pattern is valid")
});

/// Resolves a Spotify user id from free-form input.
///
/// Accepts either a raw id or a profile link such as
/// `https://open.spotify.com/user/abc123?si=...`. Anything that does not
/// contain a profile path is returned unchanged; invalid ids surface later
/// as API errors.
pub fn extract_user_id(input: &str) -> String {
    match PROFILE_URL.captures(input).and_then(|c| c.get(1)) {
        Some(id) => id.as_str().to_string(),
        None => input.to_string(),
    }
}

/// Returns a fresh anti-forgery token for the OAuth `state` parameter.
///
/// 16 random bytes, URL-safe base64 without padding (22 characters).
pub fn generate_anti_forgery_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
