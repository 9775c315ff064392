//! # API Module
//!
//! HTTP handlers of the web front-end.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`, entry page; forgets any previous session state
//! - [`auth`] - `POST /auth`, resolves the typed identifier and redirects to
//!   Spotify's consent screen
//! - [`callback`] - `GET /callback`, validates the OAuth state, fetches top
//!   tracks, analyzes them and renders the results page
//! - [`logout`] - `GET /logout`, clears the session and signs out of Spotify
//! - [`health`] - `GET /health`, liveness probe
//!
//! ## Error Responses
//!
//! Flow problems (missing input, forged or stale state) redirect to `/`.
//! Remote failures during the callback render `error: <message>` with
//! status 400. Commentary failures never surface; see
//! [`crate::commentary`].

mod auth;
mod callback;
mod health;
mod index;
mod logout;
mod pages;

pub use auth::auth;
pub use callback::callback;
pub use health::health;
pub use index::index;
pub use logout::logout;
