use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use reqwest::Client;

use crate::{
    Res, api,
    commentary::{OpenAiGenerator, TextGenerator},
    config::Config,
    info,
    session::SessionStore,
};

/// Shared state handed to every request through an [`Extension`] layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub http: Client,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let generator = Arc::new(OpenAiGenerator::from_config(http.clone(), &config));
        Self::with_generator(config, http, generator)
    }

    pub fn with_generator(config: Config, http: Client, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new()),
            http,
            generator,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/auth", post(api::auth))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/health", get(api::health))
        .layer(middleware::from_fn(no_cache))
        .layer(Extension(state))
}

/// Disables browser and proxy caching on every response.
pub async fn no_cache(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));

    response
}

pub async fn start_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_address)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
