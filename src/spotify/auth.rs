use chrono::Utc;
use reqwest::Client;
use thiserror::Error;

use crate::{
    config::Config,
    session::VisitorSession,
    spotify::{SpotifyError, read_json},
    types::{Token, TokenResponse},
    utils,
};

/// Read-only access to the visitor's top artists and tracks.
pub const SCOPE: &str = "user-top-read";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization state does not match")]
    StateMismatch,

    #[error("missing authorization code")]
    MissingCode,

    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

/// Builds the Spotify authorization URL for the given anti-forgery `state`.
///
/// `show_dialog=true` makes Spotify ask for consent again even when the
/// app was approved before, so visitors can switch accounts.
pub fn authorize_url(config: &Config, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}&show_dialog=true",
        auth_url = config.spotify_auth_url,
        client_id = urlencoding::encode(&config.spotify_client_id),
        redirect_uri = urlencoding::encode(&config.spotify_redirect_uri),
        scope = urlencoding::encode(SCOPE),
        state = urlencoding::encode(state),
    )
}

/// Starts an authorization flow for this visitor.
///
/// Stores a fresh anti-forgery token in the session and returns the URL the
/// visitor must be redirected to.
pub async fn begin_auth(config: &Config, session: &VisitorSession) -> String {
    let state = utils::generate_anti_forgery_token();
    session
        .update(|s| s.auth_state = Some(state.clone()))
        .await;

    format!("{}&force_verify=true", authorize_url(config, &state))
}

/// Returns true only when a state was issued and the callback echoes it back.
pub fn verify_state(issued: Option<&str>, returned: Option<&str>) -> bool {
    match (issued, returned) {
        (Some(issued), Some(returned)) => issued == returned,
        _ => false,
    }
}

/// Finishes the authorization flow started by [`begin_auth`].
///
/// The issued state is consumed either way. On mismatch the whole session is
/// discarded. On success the access token is cached in the session.
pub async fn complete_auth(
    client: &Client,
    config: &Config,
    session: &VisitorSession,
    returned_state: Option<&str>,
    code: Option<&str>,
) -> Result<Token, AuthError> {
    let issued = session.update(|s| s.auth_state.take()).await;

    if !verify_state(issued.as_deref(), returned_state) {
        session.clear().await;
        return Err(AuthError::StateMismatch);
    }

    let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;
    let token = exchange_code(client, config, code).await?;

    session.update(|s| s.token = Some(token.clone())).await;
    Ok(token)
}

/// Exchanges an authorization code for an access token.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
) -> Result<Token, SpotifyError> {
    let endpoint = "/api/token";
    let response = client
        .post(&config.spotify_token_url)
        .basic_auth(&config.spotify_client_id, Some(&config.spotify_client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|source| SpotifyError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let json: TokenResponse = read_json(endpoint, response).await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token,
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
