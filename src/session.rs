//! Chat session controller
//!
//! A `ChatSession` owns the transcript of one chat view. Each turn goes
//! `Idle -> AwaitingResponse -> Idle`: [`ChatSession::begin_turn`] appends the
//! user message and hands back the request to send, [`ChatSession::settle`]
//! appends exactly one bot message for whatever the request produced. Input is
//! ignored while a request is outstanding, so there is never more than one in
//! flight per session.

use tracing::{debug, warn};

use crate::api::{ChatBackend, QueryRequest};
use crate::error::Result;
use crate::input::InputLine;
use crate::state::{ChatMessage, PresentationMode};

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: InputLine,
    awaiting_response: bool,
    presentation_mode: PresentationMode,
    // Bumped on every change to `messages` or `awaiting_response`
    revision: u64,
}

impl ChatSession {
    pub fn new(presentation_mode: PresentationMode) -> Self {
        Self {
            presentation_mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// The input field, or `None` while it is disabled by a pending request.
    pub fn input_mut(&mut self) -> Option<&mut InputLine> {
        if self.awaiting_response {
            None
        } else {
            Some(&mut self.input)
        }
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn presentation_mode(&self) -> PresentationMode {
        self.presentation_mode
    }

    pub fn toggle_presentation_mode(&mut self) {
        self.presentation_mode = self.presentation_mode.toggled();
    }

    /// Changes whenever the transcript or the awaiting flag changes, so a view
    /// knows when to scroll back to the latest message.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start a turn from the current input.
    ///
    /// Returns `None` without touching anything when the input is blank or a
    /// request is already outstanding. Otherwise the user message is appended,
    /// the input cleared, the session marked as awaiting, and the request to
    /// send is returned.
    pub fn begin_turn(&mut self) -> Option<QueryRequest> {
        if self.awaiting_response || self.input.is_blank() {
            return None;
        }

        let query = self.input.take();
        self.messages.push(ChatMessage::user(query.clone()));
        self.awaiting_response = true;
        self.revision += 1;
        debug!(turn = self.messages.len(), "chat turn started");

        Some(QueryRequest { query })
    }

    /// Finish the outstanding turn with its outcome.
    ///
    /// Always clears the awaiting flag. A reply becomes a bot message, any
    /// error becomes a bot message describing it.
    pub fn settle(&mut self, outcome: Result<String>) {
        if !self.awaiting_response {
            warn!("settlement arrived with no request outstanding, ignoring");
            return;
        }

        let text = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "chat turn failed");
                err.user_message()
            }
        };

        self.messages.push(ChatMessage::bot(text));
        self.awaiting_response = false;
        self.revision += 1;
    }

    /// Run a whole turn inline: begin, ask the backend, settle.
    ///
    /// Returns `false` if the input was rejected and nothing was sent.
    pub async fn send(&mut self, backend: &dyn ChatBackend) -> bool {
        let Some(request) = self.begin_turn() else {
            return false;
        };
        let outcome = backend.start_chat(&request).await;
        self.settle(outcome);
        true
    }
}
