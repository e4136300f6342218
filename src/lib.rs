//! RepoChat terminal client
//!
//! Submit a public GitHub repository to a RepoChat backend, then ask questions
//! about it in one or more chat views.
//!
//! - `landing`: repository submission and navigation to a chat view
//! - `session`: the per-view chat transcript and turn lifecycle
//! - `api`: HTTP client for `/init-chat` and `/start-chat`
//! - `config`, `cli`: settings from file, environment and flags
//! - `app`, `handler`, `ui`, `tui`: the terminal application shell

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod input;
pub mod landing;
pub mod session;
pub mod state;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use api::{ChatBackend, InitAck, InitRequest, QueryRequest, RepoChatClient};
pub use config::{Config, Settings};
pub use error::{RepoChatError, Result};
pub use landing::{LandingSubmitter, Navigator, Route, DEFAULT_NAVIGATION_DELAY};
pub use session::ChatSession;
pub use state::{ChatMessage, PresentationMode, Sender};

#[cfg(test)]
mod test_utils;
