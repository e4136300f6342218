//! Test doubles for the backend and navigation seams

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ChatBackend, InitAck, InitRequest, QueryRequest};
use crate::error::{RepoChatError, Result};
use crate::landing::{Navigator, Route};

/// One canned backend answer
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Status(u16, &'static str),
    Missing,
}

impl Scripted {
    fn into_result(self) -> Result<String> {
        match self {
            Scripted::Reply(text) => Ok(text),
            Scripted::Status(status, detail) => Err(RepoChatError::Server {
                status,
                detail: detail.to_string(),
            }),
            Scripted::Missing => Err(RepoChatError::MissingMessage),
        }
    }
}

/// Backend that answers from a queue and records every request it saw
#[derive(Default)]
pub struct ScriptedBackend {
    answers: Mutex<VecDeque<Scripted>>,
    pub init_requests: Mutex<Vec<InitRequest>>,
    pub queries: Mutex<Vec<QueryRequest>>,
}

impl ScriptedBackend {
    pub fn new(answers: Vec<Scripted>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    pub fn init_count(&self) -> usize {
        self.init_requests.lock().unwrap().len()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn next_answer(&self) -> Scripted {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Missing)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn init_chat(&self, request: &InitRequest) -> Result<InitAck> {
        self.init_requests.lock().unwrap().push(request.clone());
        self.next_answer().into_result().map(|message| InitAck {
            message,
            local_path: None,
        })
    }

    async fn start_chat(&self, request: &QueryRequest) -> Result<String> {
        self.queries.lock().unwrap().push(request.clone());
        self.next_answer().into_result()
    }
}

/// Navigator that only remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<Route>,
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, route: Route) {
        self.opened.push(route);
    }
}
