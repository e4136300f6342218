use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repochat::{
    ChatBackend, ChatMessage, ChatSession, InitRequest, LandingSubmitter, Navigator,
    RepoChatClient, RepoChatError, Route, Sender,
};

#[derive(Default)]
struct Recorder {
    opened: Vec<Route>,
}

impl Navigator for Recorder {
    fn open(&mut self, route: Route) {
        self.opened.push(route);
    }
}

fn ask(session: &mut ChatSession, question: &str) {
    let input = session.input_mut().expect("input should be enabled");
    for c in question.chars() {
        input.insert(c);
    }
}

#[tokio::test]
async fn chat_turn_against_live_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .and(body_json(json!({ "query": "What does main.py do?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "It starts the server." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut session = ChatSession::default();

    ask(&mut session, "What does main.py do?");
    assert!(session.send(&client).await);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], ChatMessage::user("What does main.py do?"));
    assert_eq!(messages[1], ChatMessage::bot("It starts the server."));
}

#[tokio::test]
async fn chat_http_500_becomes_error_bubble() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "Internal error: boom" })),
        )
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut session = ChatSession::default();

    ask(&mut session, "Explain the ingest step");
    session.send(&client).await;

    let last = session.messages().last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert!(last.text.contains("500"));
    assert_eq!(last.text, "Error: Server returned 500 Internal Server Error");
    assert!(!session.is_awaiting_response());
}

#[tokio::test]
async fn chat_empty_body_signals_missing_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut session = ChatSession::default();

    ask(&mut session, "anything");
    session.send(&client).await;

    assert_eq!(
        session.messages()[1].text,
        "Error: Response does not contain a message."
    );
}

#[tokio::test]
async fn chat_non_json_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut session = ChatSession::default();

    ask(&mut session, "anything");
    session.send(&client).await;

    assert!(session.messages()[1]
        .text
        .starts_with("Error: Invalid response body:"));
}

#[tokio::test]
async fn chat_network_failure_keeps_session_usable() {
    // Nothing listens on port 1
    let client = RepoChatClient::new("http://127.0.0.1:1");
    let mut session = ChatSession::default();

    ask(&mut session, "first");
    session.send(&client).await;

    assert_eq!(session.messages().len(), 2);
    assert!(session.messages()[1].text.starts_with("Error: "));
    assert!(!session.is_awaiting_response());
    assert!(session.input_mut().is_some());
}

#[tokio::test]
async fn init_success_returns_acknowledgement() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/init-chat"))
        .and(body_json(json!({ "repo_url": "https://github.com/fastapi/fastapi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Repository cloned successfully",
            "local_path": "/app/workspace/fastapi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let ack = client
        .init_chat(&InitRequest {
            repo_url: "https://github.com/fastapi/fastapi".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(ack.message, "Repository cloned successfully");
    assert_eq!(ack.local_path.as_deref(), Some("/app/workspace/fastapi"));
}

#[tokio::test]
async fn init_validation_error_shows_first_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/init-chat"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "repo_url"], "msg": "Value error, Only 'github.com' URLs are allowed", "type": "value_error" }
            ]
        })))
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut navigator = Recorder::default();
    let mut landing = LandingSubmitter::new(Duration::ZERO).with_url("https://gitlab.com/a/b");

    assert!(landing.submit(&client, &mut navigator).await);

    assert!(navigator.opened.is_empty());
    assert!(!landing.is_loading());
    assert_eq!(
        landing.alert(),
        Some("Error: Server returned 422 Value error, Only 'github.com' URLs are allowed")
    );
}

#[tokio::test]
async fn init_error_without_detail_uses_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/init-chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let err = client
        .init_chat(&InitRequest {
            repo_url: "https://github.com/a/b".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        RepoChatError::Server { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail, "Bad Gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn landing_success_navigates_to_chat() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/init-chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Repository cloned successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&format!("{}/", server.uri()));
    let mut navigator = Recorder::default();
    let mut landing =
        LandingSubmitter::new(Duration::from_millis(50)).with_url("https://github.com/a/b");

    let started = std::time::Instant::now();
    landing.submit(&client, &mut navigator).await;

    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(navigator.opened, vec![Route::Chat]);
    assert!(!landing.is_loading());
    assert_eq!(landing.alert(), None);
}

#[tokio::test]
async fn landing_empty_url_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = RepoChatClient::new(&server.uri());
    let mut navigator = Recorder::default();
    let mut landing = LandingSubmitter::default();

    assert!(!landing.submit(&client, &mut navigator).await);
    assert_eq!(landing.alert(), Some("Please enter a GitHub URL."));
    assert!(!landing.is_loading());
}
