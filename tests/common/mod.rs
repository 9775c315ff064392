//! In-process stand-ins for the Spotify accounts service, the Spotify Web
//! API and the chat-completions endpoint.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use vibecheck::config::Config;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const OPENAI_KEY: &str = "sk-test";
pub const ACCESS_TOKEN: &str = "mock-access";
pub const ROAST: &str = "vibe check: certified mid 💀";

#[derive(Clone)]
pub struct MockOptions {
    pub profile: Value,
    pub top_tracks_status: StatusCode,
    pub chat_status: StatusCode,
    pub chat_reply: Value,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            profile: json!({
                "id": "abc123",
                "display_name": "Mock Listener",
                "images": [{ "url": "https://i.scdn.co/image/avatar" }],
                "followers": { "total": 7 },
                "country": "SE",
                "product": "premium"
            }),
            top_tracks_status: StatusCode::OK,
            chat_status: StatusCode::OK,
            chat_reply: json!({
                "choices": [{ "message": { "role": "assistant", "content": ROAST } }]
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct Recorder {
    artist_lookups: Arc<Mutex<Vec<String>>>,
    token_requests: Arc<Mutex<Vec<RecordedRequest>>>,
    chat_requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct MockState {
    options: MockOptions,
    recorder: Recorder,
}

pub struct MockRemote {
    pub base_url: String,
    recorder: Recorder,
}

impl MockRemote {
    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn artist_lookups(&self) -> Vec<String> {
        self.recorder.artist_lookups.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<RecordedRequest> {
        self.recorder.token_requests.lock().unwrap().clone()
    }

    pub fn chat_requests(&self) -> Vec<RecordedRequest> {
        self.recorder.chat_requests.lock().unwrap().clone()
    }

    /// Config whose remote endpoints all point at this mock.
    pub fn config(&self) -> Config {
        let base = self.base_url.clone();
        Config::from_lookup(move |key: &str| match key {
            "SPOTIFY_CLIENT_ID" => Some(CLIENT_ID.to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some(CLIENT_SECRET.to_string()),
            "OPENAI_API_KEY" => Some(OPENAI_KEY.to_string()),
            "SPOTIFY_API_URL" => Some(format!("{}/v1", base)),
            "SPOTIFY_API_TOKEN_URL" => Some(format!("{}/accounts/api/token", base)),
            "OPENAI_API_URL" => Some(format!("{}/openai", base)),
            _ => None,
        })
        .unwrap()
    }
}

pub async fn start(options: MockOptions) -> MockRemote {
    let recorder = Recorder::default();
    let state = MockState {
        options,
        recorder: recorder.clone(),
    };

    let app = Router::new()
        .route("/accounts/api/token", post(token))
        .route("/v1/me", get(profile))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/artists/{id}", get(artist))
        .route("/openai/chat/completions", post(chat))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockRemote {
        base_url: format!("http://{}", addr),
        recorder,
    }
}

fn record(headers: &HeaderMap, body: String) -> RecordedRequest {
    RecordedRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    }
}

async fn token(State(state): State<MockState>, headers: HeaderMap, body: String) -> Json<Value> {
    state
        .recorder
        .token_requests
        .lock()
        .unwrap()
        .push(record(&headers, body));

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-top-read",
        "refresh_token": "mock-refresh"
    }))
}

async fn profile(State(state): State<MockState>) -> Json<Value> {
    Json(state.options.profile.clone())
}

fn track(name: &str, popularity: u32, artists: Value) -> Value {
    json!({ "name": name, "popularity": popularity, "artists": artists })
}

async fn top_tracks(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if state.options.top_tracks_status != StatusCode::OK {
        return (state.options.top_tracks_status, "upstream exploded").into_response();
    }

    let items = match params.get("time_range").map(String::as_str) {
        Some("short_term") => vec![
            track(
                "Glitter",
                80,
                json!([
                    { "id": "a1", "name": "Charli" },
                    { "id": "a2", "name": "Feature Guy" }
                ]),
            ),
            track("Home Demo", 10, json!([{ "id": null, "name": "Local Files" }])),
        ],
        Some("medium_term") => vec![track("Indie Song", 40, json!([{ "id": "a3", "name": "Band" }]))],
        Some("long_term") => Vec::new(),
        _ => return (StatusCode::BAD_REQUEST, "bad time_range").into_response(),
    };

    if params.get("limit").map(String::as_str) != Some("20") {
        return (StatusCode::BAD_REQUEST, "bad limit").into_response();
    }

    Json(json!({ "items": items })).into_response()
}

async fn artist(State(state): State<MockState>, Path(id): Path<String>) -> Json<Value> {
    state.recorder.artist_lookups.lock().unwrap().push(id.clone());

    let genres = match id.as_str() {
        "a1" => json!(["hyperpop", "pop"]),
        "a3" => json!(["indie"]),
        _ => json!(["from-a-featured-artist"]),
    };
    Json(json!({ "id": id, "name": format!("Artist {}", id), "genres": genres }))
}

async fn chat(State(state): State<MockState>, headers: HeaderMap, body: String) -> Response {
    state
        .recorder
        .chat_requests
        .lock()
        .unwrap()
        .push(record(&headers, body));

    (state.options.chat_status, Json(state.options.chat_reply.clone())).into_response()
}
