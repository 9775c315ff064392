use reqwest::Client;

use crate::{
    spotify::{SpotifyError, get_json},
    types::Artist,
};

/// Retrieves a single artist, mainly for its genre tags.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `token` - Access token of the signed-in visitor
/// * `artist_id` - Spotify id of the artist
///
/// # Returns
///
/// The decoded [`Artist`]. A missing `genres` field decodes as no genres;
/// a missing `id` or `name` is a decode error.
pub async fn get_artist(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
) -> Result<Artist, SpotifyError> {
    let path = format!("/artists/{}", urlencoding::encode(artist_id));
    get_json(client, api_url, &path, token).await
}
