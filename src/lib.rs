//! vibecheck library
//!
//! A small web front-end that signs a visitor in with Spotify, pulls their
//! top tracks for three listening windows, aggregates them into a taste
//! profile and asks a hosted text-generation model to roast it.
//!
//! # Modules
//!
//! - `analysis` - Pure aggregation over fetched tracks
//! - `api` - HTTP handlers and page rendering
//! - `commentary` - Prompt building and the text-generation client
//! - `config` - Environment loading and the runtime configuration record
//! - `server` - Router construction and the listening loop
//! - `session` - Per-visitor session store and extractor
//! - `spotify` - Spotify Web API and OAuth client
//! - `types` - Wire records and domain data structures
//! - `utils` - Identity resolution and token helpers

pub mod analysis;
pub mod api;
pub mod commentary;
pub mod config;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup code that may fail.
///
/// Request handling uses the typed errors of each module instead; this alias
/// is for the outer layers where any error simply ends the program.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures. Request handlers must never call this,
/// since it takes the whole server down.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, such as a failed remote call that is
/// turned into an error page or a fallback text.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
