use axum::response::{Html, IntoResponse};

use crate::{api::pages, session::VisitorSession};

pub async fn index(session: VisitorSession) -> impl IntoResponse {
    session.clear().await;
    (session.cookies(), Html(pages::entry_page()))
}
