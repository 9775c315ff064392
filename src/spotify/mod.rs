//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API and accounts service this
//! app needs:
//!
//! - [`auth`] - Authorization URL building and code-for-token exchange
//! - [`profile`] - `GET /me`
//! - [`tracks`] - `GET /me/top/tracks` for each listening window
//! - [`artists`] - `GET /artists/{id}` for genre tags
//!
//! Calls are sequential, with no retries and no client-side timeouts. Any
//! failure is returned as a [`SpotifyError`] and ends the request.
//! Responses are decoded into the records in [`crate::types`]; a missing
//! required field is a decode error naming the endpoint.

pub mod artists;
pub mod auth;
pub mod profile;
pub mod tracks;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Sends a bearer-authenticated GET to the Web API and decodes the body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    api_url: &str,
    path: &str,
    token: &str,
) -> Result<T, SpotifyError> {
    let url = format!("{}{}", api_url.trim_end_matches('/'), path);
    let response = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|source| SpotifyError::Http {
            endpoint: path.to_string(),
            source,
        })?;

    read_json(path, response).await
}

/// Checks the status of a response and decodes its JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, SpotifyError> {
    let status = response.status();
    let body = response.text().await.map_err(|source| SpotifyError::Http {
        endpoint: endpoint.to_string(),
        source,
    })?;

    if !status.is_success() {
        return Err(SpotifyError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| SpotifyError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
