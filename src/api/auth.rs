use axum::{
    Extension, Form,
    extract::rejection::FormRejection,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::{info, server::AppState, session::VisitorSession, spotify, utils};

#[derive(Debug, Deserialize)]
pub struct AuthForm {
    pub user_id: Option<String>,
}

/// Starts the OAuth dance for the identifier typed on the entry page.
///
/// Without an identifier, or with a body that is not a form, the visitor is
/// sent back to `/`.
pub async fn auth(
    Extension(app): Extension<AppState>,
    session: VisitorSession,
    form: Result<Form<AuthForm>, FormRejection>,
) -> impl IntoResponse {
    session.clear().await;

    let input = form.ok().and_then(|Form(f)| f.user_id);
    let Some(input) = input.filter(|v| !v.trim().is_empty()) else {
        return (session.cookies(), Redirect::to("/"));
    };

    let user_id = utils::extract_user_id(input.trim());
    info!("Starting authorization for {}", user_id);
    session.update(|s| s.user_id = Some(user_id)).await;

    let target = spotify::auth::begin_auth(&app.config, &session).await;
    (session.cookies(), Redirect::to(&target))
}
