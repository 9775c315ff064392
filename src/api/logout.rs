use axum::{
    Extension,
    response::{IntoResponse, Redirect},
};

use crate::{info, server::AppState, session::VisitorSession};

/// Forgets the visitor and sends them through Spotify's own logout page,
/// which returns them to the entry page afterwards.
pub async fn logout(
    Extension(app): Extension<AppState>,
    session: VisitorSession,
) -> impl IntoResponse {
    session.clear().await;
    info!("Session cleared on logout");

    let target = format!(
        "{logout_url}?continue={entry}",
        logout_url = app.config.spotify_logout_url,
        entry = urlencoding::encode(&app.config.entry_url())
    );
    (session.cookies(), Redirect::to(&target))
}
