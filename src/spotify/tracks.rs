use reqwest::Client;

use crate::{
    spotify::{SpotifyError, artists, get_json},
    types::{TimeWindow, TimeWindowBucket, TopTrack, TopTracksResponse, TrackRecord},
};

/// Number of tracks requested per window.
pub const TOP_TRACKS_LIMIT: u32 = 20;

/// Retrieves the visitor's top tracks for one window.
///
/// Ranking is Spotify's own; the order of the returned items is kept as is.
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    window: TimeWindow,
) -> Result<Vec<TopTrack>, SpotifyError> {
    let path = format!(
        "/me/top/tracks?limit={limit}&time_range={range}",
        limit = TOP_TRACKS_LIMIT,
        range = window.api_value()
    );
    let res: TopTracksResponse = get_json(client, api_url, &path, token).await?;
    Ok(res.items)
}

/// Fetches one window and resolves the genres of each track's first artist.
///
/// Tracks without a resolvable first artist (local files) get no genres.
pub async fn fetch_window(
    client: &Client,
    api_url: &str,
    token: &str,
    window: TimeWindow,
) -> Result<TimeWindowBucket, SpotifyError> {
    let items = get_top_tracks(client, api_url, token, window).await?;

    let mut tracks = Vec::with_capacity(items.len());
    for item in items {
        let genres = match item.artists.first().and_then(|a| a.id.as_deref()) {
            Some(artist_id) => {
                artists::get_artist(client, api_url, token, artist_id)
                    .await?
                    .genres
            }
            None => Vec::new(),
        };

        tracks.push(TrackRecord {
            name: item.name,
            artists: item.artists.into_iter().map(|a| a.name).collect(),
            genres,
            popularity: item.popularity,
        });
    }

    Ok(TimeWindowBucket::new(window, tracks))
}

/// Fetches all three windows in display order.
pub async fn fetch_all_windows(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Vec<TimeWindowBucket>, SpotifyError> {
    let mut buckets = Vec::with_capacity(TimeWindow::ALL.len());
    for window in TimeWindow::ALL {
        buckets.push(fetch_window(client, api_url, token, window).await?);
    }
    Ok(buckets)
}
