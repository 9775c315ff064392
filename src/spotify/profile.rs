use reqwest::Client;

use crate::{
    spotify::{SpotifyError, get_json},
    types::UserProfile,
};

/// Retrieves the profile of the user the token belongs to.
pub async fn get_current_user(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<UserProfile, SpotifyError> {
    get_json(client, api_url, "/me", token).await
}
