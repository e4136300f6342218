//! UI-agnostic chat state types
//!
//! These are shared by the session controller and the renderer and don't depend
//! on any terminal types.

use serde::{Deserialize, Serialize};

/// A single bubble in the transcript. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Purely cosmetic color scheme of a chat view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    #[default]
    Dark,
    Light,
}

impl PresentationMode {
    pub fn toggled(self) -> Self {
        match self {
            PresentationMode::Dark => PresentationMode::Light,
            PresentationMode::Light => PresentationMode::Dark,
        }
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            PresentationMode::Dark
        } else {
            PresentationMode::Light
        }
    }

    /// Label of the toggle, naming the mode it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            PresentationMode::Dark => "Light Mode",
            PresentationMode::Light => "Dark Mode",
        }
    }
}
