//! Landing view: submit a repository URL and open a chat once it is ingested
//!
//! After the backend acknowledges the repository, the submitter waits a fixed
//! grace period before opening the chat view. The wait is blind; nothing is
//! polled to confirm the backend is ready.

use std::time::Duration;

use tracing::{info, warn};

use crate::api::{ChatBackend, InitAck, InitRequest};
use crate::error::Result;
use crate::input::InputLine;

/// Grace period between a successful init and opening the chat view
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_secs(5);

pub const EMPTY_URL_ALERT: &str = "Please enter a GitHub URL.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Chat,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Chat => "/chat",
        }
    }
}

/// Opens views. Every `open(Route::Chat)` is a new chat with fresh state.
pub trait Navigator {
    fn open(&mut self, route: Route);
}

#[derive(Debug, Clone)]
pub struct LandingSubmitter {
    input: InputLine,
    loading: bool,
    alert: Option<String>,
    navigation_delay: Duration,
}

impl Default for LandingSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_NAVIGATION_DELAY)
    }
}

impl LandingSubmitter {
    pub fn new(navigation_delay: Duration) -> Self {
        Self {
            input: InputLine::default(),
            loading: false,
            alert: None,
            navigation_delay,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.input = InputLine::with_text(url);
        self
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// The URL field, or `None` while the form is disabled.
    pub fn input_mut(&mut self) -> Option<&mut InputLine> {
        if self.loading || self.alert.is_some() {
            None
        } else {
            Some(&mut self.input)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn navigation_delay(&self) -> Duration {
        self.navigation_delay
    }

    /// Validate the URL and enter the loading state.
    ///
    /// Returns `None` when a submission is already running, or when the URL
    /// is blank, in which case an alert is raised instead.
    pub fn begin_submit(&mut self) -> Option<InitRequest> {
        if self.loading {
            return None;
        }
        if self.input.is_blank() {
            self.alert = Some(EMPTY_URL_ALERT.to_string());
            return None;
        }

        self.alert = None;
        self.loading = true;
        let repo_url = self.input.text().trim().to_string();
        info!(%repo_url, "submitting repository");

        Some(InitRequest { repo_url })
    }

    /// Send the init request and, if it succeeds, sit out the navigation delay.
    pub async fn initialize(
        backend: &dyn ChatBackend,
        request: InitRequest,
        navigation_delay: Duration,
    ) -> Result<InitAck> {
        let ack = backend.init_chat(&request).await?;
        tokio::time::sleep(navigation_delay).await;
        Ok(ack)
    }

    /// Leave the loading state, then either open the chat or raise an alert.
    pub fn finish(&mut self, outcome: Result<InitAck>, navigator: &mut dyn Navigator) {
        self.loading = false;
        match outcome {
            Ok(_) => navigator.open(Route::Chat),
            Err(err) => {
                warn!(error = %err, "repository submission failed");
                self.alert = Some(err.user_message());
            }
        }
    }

    /// Run a whole submission inline. Returns `false` if nothing was sent.
    pub async fn submit(
        &mut self,
        backend: &dyn ChatBackend,
        navigator: &mut dyn Navigator,
    ) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let outcome = Self::initialize(backend, request, self.navigation_delay).await;
        self.finish(outcome, navigator);
        true
    }
}
