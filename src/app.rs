use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{ChatBackend, InitAck};
use crate::config::Settings;
use crate::error::Result;
use crate::landing::{LandingSubmitter, Navigator, Route};
use crate::session::ChatSession;
use crate::state::PresentationMode;

/// Which view currently owns the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Chat(usize),
}

/// One open chat view: its session plus the request it is waiting on
pub struct ChatView {
    pub id: usize,
    pub session: ChatSession,
    pub task: Option<JoinHandle<Result<String>>>,
    pub scroll: u16,
    pub chat_height: u16,    // Inner height of the transcript area
    pub content_height: u16, // Wrapped transcript lines, as last laid out by the renderer
    seen_revision: u64,
}

impl ChatView {
    fn new(id: usize, mode: PresentationMode) -> Self {
        Self {
            id,
            session: ChatSession::new(mode),
            task: None,
            scroll: 0,
            chat_height: 0,
            content_height: 0,
            seen_revision: 0,
        }
    }

    pub fn title(&self) -> String {
        format!("Chat {}", self.id)
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.chat_height)
    }

    /// Record the laid out transcript size, then jump to the latest message
    /// if the transcript changed since the last frame, or keep the offset in
    /// range otherwise.
    pub fn sync_scroll(&mut self, content_height: u16, chat_height: u16) {
        self.content_height = content_height;
        self.chat_height = chat_height;

        let max = self.max_scroll();
        if self.session.revision() != self.seen_revision {
            self.seen_revision = self.session.revision();
            self.scroll = max;
        } else {
            self.scroll = self.scroll.min(max);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }
}

/// All open chat views. Acts as the navigator for the landing view.
pub struct ChatViews {
    pub views: Vec<ChatView>,
    next_id: usize,
    default_mode: PresentationMode,
    requested: Option<View>,
}

impl ChatViews {
    pub fn new(default_mode: PresentationMode) -> Self {
        Self {
            views: Vec::new(),
            next_id: 1,
            default_mode,
            requested: None,
        }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The view most recently asked for through [`Navigator::open`].
    pub fn take_requested(&mut self) -> Option<View> {
        self.requested.take()
    }
}

impl Navigator for ChatViews {
    fn open(&mut self, route: Route) {
        match route {
            Route::Landing => self.requested = Some(View::Landing),
            Route::Chat => {
                let view = ChatView::new(self.next_id, self.default_mode);
                info!(chat = view.id, route = route.path(), "opening chat view");
                self.next_id += 1;
                self.views.push(view);
                self.requested = Some(View::Chat(self.views.len() - 1));
            }
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub landing: LandingSubmitter,
    pub init_task: Option<JoinHandle<Result<InitAck>>>,
    pub chats: ChatViews,
    pub animation_frame: u8,
    pub api_url: String,
    backend: Arc<dyn ChatBackend>,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, settings: &Settings) -> Self {
        Self {
            should_quit: false,
            view: View::Landing,
            landing: LandingSubmitter::new(settings.navigation_delay),
            init_task: None,
            chats: ChatViews::new(settings.presentation_mode),
            animation_frame: 0,
            api_url: settings.base_url.clone(),
            backend,
        }
    }

    pub fn active_chat(&self) -> Option<&ChatView> {
        match self.view {
            View::Chat(idx) => self.chats.views.get(idx),
            View::Landing => None,
        }
    }

    pub fn active_chat_mut(&mut self) -> Option<&mut ChatView> {
        match self.view {
            View::Chat(idx) => self.chats.views.get_mut(idx),
            View::Landing => None,
        }
    }

    /// Submit the landing form, running the init request in the background.
    pub fn submit_landing(&mut self) {
        let Some(request) = self.landing.begin_submit() else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let delay = self.landing.navigation_delay();
        self.init_task = Some(tokio::spawn(async move {
            LandingSubmitter::initialize(backend.as_ref(), request, delay).await
        }));
    }

    /// Send the active chat's input, running the query in the background.
    pub fn send_chat(&mut self) {
        let backend = Arc::clone(&self.backend);
        let Some(chat) = self.active_chat_mut() else {
            return;
        };
        let Some(request) = chat.session.begin_turn() else {
            return;
        };

        debug!(chat = chat.id, "dispatching query");
        chat.task = Some(tokio::spawn(async move {
            backend.start_chat(&request).await
        }));
    }

    /// Settle every background request that has finished.
    pub async fn poll_tasks(&mut self) {
        if self.init_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.init_task.take() {
                let outcome = match task.await {
                    Ok(outcome) => outcome,
                    Err(err) => Err(err.into()),
                };
                self.landing.finish(outcome, &mut self.chats);
                if let Some(view) = self.chats.take_requested() {
                    self.view = view;
                } else if self.landing.alert().is_some() {
                    // The alert is drawn on the landing view only
                    self.view = View::Landing;
                }
            }
        }

        for chat in &mut self.chats.views {
            if chat.task.as_ref().is_some_and(|task| task.is_finished()) {
                if let Some(task) = chat.task.take() {
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(err) => Err(err.into()),
                    };
                    chat.session.settle(outcome);
                }
            }
        }
    }

    pub fn has_pending_work(&self) -> bool {
        self.init_task.is_some() || self.chats.views.iter().any(|chat| chat.task.is_some())
    }

    pub fn tick_animation(&mut self) {
        if self.landing.is_loading()
            || self
                .chats
                .views
                .iter()
                .any(|chat| chat.session.is_awaiting_response())
        {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        }
    }

    /// Cycle Landing -> Chat 1 -> ... -> Chat n -> Landing.
    pub fn next_view(&mut self) {
        let count = self.chats.len();
        self.view = match self.view {
            View::Landing if count > 0 => View::Chat(0),
            View::Chat(idx) if idx + 1 < count => View::Chat(idx + 1),
            _ => View::Landing,
        };
    }

    pub fn prev_view(&mut self) {
        let count = self.chats.len();
        self.view = match self.view {
            View::Landing if count > 0 => View::Chat(count - 1),
            View::Chat(idx) if idx > 0 => View::Chat(idx - 1),
            _ => View::Landing,
        };
    }

    /// Close the active chat view, dropping its session and any pending request.
    pub fn close_active_chat(&mut self) {
        let View::Chat(idx) = self.view else {
            return;
        };
        if idx >= self.chats.len() {
            self.view = View::Landing;
            return;
        }

        let chat = self.chats.views.remove(idx);
        if let Some(task) = chat.task {
            task.abort();
        }
        info!(chat = chat.id, "closed chat view");

        self.view = if self.chats.is_empty() {
            View::Landing
        } else {
            View::Chat(idx.min(self.chats.len() - 1))
        };
    }
}
