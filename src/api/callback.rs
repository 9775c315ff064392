use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    analysis,
    api::pages::{self, ResultsView},
    commentary, info,
    server::AppState,
    session::VisitorSession,
    spotify::{self, SpotifyError, auth::AuthError},
    success, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self {
            CallbackError::Auth(AuthError::StateMismatch) => Redirect::to("/").into_response(),
            other => (StatusCode::BAD_REQUEST, format!("error: {}", other)).into_response(),
        }
    }
}

/// Completes the OAuth flow and renders the visitor's taste profile.
pub async fn callback(
    Extension(app): Extension<AppState>,
    session: VisitorSession,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    let result = render_results(&app, &session, &params).await;
    match &result {
        Ok(_) => success!("Rendered results for session"),
        Err(CallbackError::Auth(AuthError::StateMismatch)) => {
            info!("Authorization state mismatch, restarting flow")
        }
        Err(e) => warning!("Callback failed: {}", e),
    }
    (session.cookies(), result)
}

async fn render_results(
    app: &AppState,
    session: &VisitorSession,
    params: &CallbackParams,
) -> Result<Html<String>, CallbackError> {
    let token = spotify::auth::complete_auth(
        &app.http,
        &app.config,
        session,
        params.state.as_deref(),
        params.code.as_deref(),
    )
    .await?;

    let api_url = app.config.spotify_api_url.as_str();
    let access_token = token.access_token.as_str();

    let profile = spotify::profile::get_current_user(&app.http, api_url, access_token).await?;
    let buckets = spotify::tracks::fetch_all_windows(&app.http, api_url, access_token).await?;

    let analysis = analysis::analyze(&buckets);
    let commentary = commentary::generate_commentary(app.generator.as_ref(), &analysis).await;
    let requested = session.get().await.user_id;

    Ok(Html(pages::results_page(&ResultsView {
        profile: &profile,
        requested_user_id: requested.as_deref(),
        analysis: &analysis,
        commentary: &commentary,
    })))
}
