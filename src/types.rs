use std::fmt;

use serde::{Deserialize, Serialize};

/// OAuth credentials cached in the visitor's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// One of the three listening windows Spotify ranks top items over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Recent,
    Medium,
    AllTime,
}

impl TimeWindow {
    /// All windows in display order, most recent first.
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Recent, TimeWindow::Medium, TimeWindow::AllTime];

    /// Value of the `time_range` query parameter.
    pub fn api_value(&self) -> &'static str {
        match self {
            TimeWindow::Recent => "short_term",
            TimeWindow::Medium => "medium_term",
            TimeWindow::AllTime => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Recent => "Last 4 Weeks",
            TimeWindow::Medium => "Last 6 Months",
            TimeWindow::AllTime => "All Time",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeWindow::Recent => "recent",
            TimeWindow::Medium => "medium",
            TimeWindow::AllTime => "all_time",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub name: String,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeWindowBucket {
    pub window: TimeWindow,
    pub label: String,
    pub tracks: Vec<TrackRecord>,
}

impl TimeWindowBucket {
    pub fn new(window: TimeWindow, tracks: Vec<TrackRecord>) -> Self {
        Self {
            window,
            label: window.label().to_string(),
            tracks,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<TopTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTrack {
    pub name: String,
    pub popularity: u32,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    /// Absent for local files.
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub followers: Option<Followers>,
    pub country: Option<String>,
    pub product: Option<String>,
}

impl UserProfile {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
