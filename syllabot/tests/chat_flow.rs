//! End-to-end chat exchanges against mocked collaborator services.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{chat_completion_json, index_match, test_config, EmbeddingResponder};
use syllabot::embeddings::EmbeddingProvider;
use syllabot::index::VectorIndexClient;
use syllabot::llm::{prompts, LlmProvider};
use syllabot::memory::{InMemorySessionStore, SessionStore};
use syllabot::models::{session_key, ConversationTurn};
use syllabot::services::ChatService;

const COURSE_ID: u64 = 42;
const SESSION_ID: &str = "session-1";

fn chat_service(server: &MockServer, store: Arc<InMemorySessionStore>) -> ChatService {
    let config = test_config(&server.uri());
    let embeddings = EmbeddingProvider::new(&config.embeddings).expect("embedding provider");
    let index = VectorIndexClient::new(&config.index).expect("index client");
    let llm = LlmProvider::new(&config.llm).expect("llm provider");
    ChatService::new(embeddings, index, llm, store, &config)
}

async fn mount_embeddings(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(EmbeddingResponder)
        .mount(server)
        .await;
}

async fn mount_query(server: &MockServer, matches: Value) {
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matches": matches})))
        .mount(server)
        .await;
}

async fn mount_llm(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_json(answer)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn surfaces_upcoming_assignment_in_context_and_saves_history() {
    let server = MockServer::start().await;
    let due_tomorrow = (Utc::now() + Duration::days(1)).to_rfc3339();
    let assignment_text = format!("Assignment: Homework 5 | Due: {due_tomorrow} | Points: 10");

    mount_embeddings(&server).await;
    mount_query(
        &server,
        json!([
            index_match("42-0", 0.91, "assignment", &assignment_text, Some(&due_tomorrow)),
            index_match(
                "42-1",
                0.88,
                "announcement",
                "Announcement: Midterm rooms | Message: Section 10234 meets in B-12.",
                None,
            ),
        ]),
    )
    .await;
    mount_llm(&server, "Homework 5 is due tomorrow.").await;

    let store = Arc::new(InMemorySessionStore::new());
    let service = chat_service(&server, store.clone());

    let answer = service
        .chat(COURSE_ID, SESSION_ID, "what's due this week?")
        .await
        .expect("chat succeeds");
    assert_eq!(answer, "Homework 5 is due tomorrow.");

    // The system instruction puts the assignment in the upcoming section,
    // ahead of the announcement.
    let requests = server.received_requests().await.expect("recorded requests");
    let llm_request = requests
        .iter()
        .find(|r| r.url.path() == "/chat/completions")
        .expect("llm called");
    let body: Value = serde_json::from_slice(&llm_request.body).expect("llm body");
    let system = body["messages"][0]["content"].as_str().expect("system");

    let upcoming_at = system.find("UPCOMING ASSIGNMENTS:").expect("upcoming section");
    let assignment_at = system.find("Assignment: Homework 5").expect("assignment present");
    let announcements_at = system.find("RECENT ANNOUNCEMENTS:").expect("announcement section");
    let announcement_at = system.find("Announcement: Midterm rooms").expect("announcement");
    assert!(upcoming_at < assignment_at && assignment_at < announcements_at);
    assert!(
        announcements_at < announcement_at,
        "the announcement must sit in its own section, not among upcoming assignments"
    );

    // Exactly one user+assistant pair was appended.
    let history = store
        .get(&session_key(COURSE_ID, SESSION_ID))
        .await
        .expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "what's due this week?");
    assert_eq!(history[1].content, "Homework 5 is due tomorrow.");
}

#[tokio::test]
async fn no_matches_returns_fixed_answer_without_model_call_or_memory_write() {
    let server = MockServer::start().await;

    mount_embeddings(&server).await;
    mount_query(&server, json!([])).await;
    mount_llm(&server, "should never be used").await;

    let store = Arc::new(InMemorySessionStore::new());
    let service = chat_service(&server, store.clone());

    let answer = service
        .chat(COURSE_ID, SESSION_ID, "anything indexed?")
        .await
        .expect("chat returns fallback");
    assert_eq!(answer, prompts::NO_DATA_ANSWER);

    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests.iter().all(|r| r.url.path() != "/chat/completions"));

    let history = store
        .get(&session_key(COURSE_ID, SESSION_ID))
        .await
        .expect("history");
    assert!(history.is_empty());
}

#[tokio::test]
async fn only_last_five_turns_reach_the_model() {
    let server = MockServer::start().await;
    let due = (Utc::now() + Duration::days(2)).to_rfc3339();

    mount_embeddings(&server).await;
    mount_query(
        &server,
        json!([index_match(
            "42-0",
            0.9,
            "assignment",
            &format!("Assignment: HW | Due: {due}"),
            Some(&due),
        )]),
    )
    .await;
    mount_llm(&server, "answered").await;

    let store = Arc::new(InMemorySessionStore::new());
    let key = session_key(COURSE_ID, SESSION_ID);
    let mut turns = Vec::new();
    for i in 0..4 {
        turns.push(ConversationTurn::user(format!("question {i}")));
        turns.push(ConversationTurn::assistant(format!("answer {i}")));
    }
    store
        .save(&key, turns, std::time::Duration::from_secs(1800))
        .await
        .expect("seed history");

    let service = chat_service(&server, store.clone());
    service
        .chat(COURSE_ID, SESSION_ID, "and now?")
        .await
        .expect("chat succeeds");

    let requests = server.received_requests().await.expect("recorded requests");
    let llm_request = requests
        .iter()
        .find(|r| r.url.path() == "/chat/completions")
        .expect("llm called");
    let body: Value = serde_json::from_slice(&llm_request.body).expect("llm body");
    let messages = body["messages"].as_array().expect("messages");

    // system + 5 recent turns + the new question
    assert_eq!(messages.len(), 7);
    assert_eq!(messages[1]["content"], "answer 1");
    assert_eq!(messages[6]["content"], "and now?");

    // Full history is retained in the store: 8 seeded + 2 new turns.
    let history = store.get(&key).await.expect("history");
    assert_eq!(history.len(), 10);
}

#[tokio::test]
async fn empty_message_is_rejected_up_front() {
    let server = MockServer::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    let service = chat_service(&server, store);

    let err = service
        .chat(COURSE_ID, SESSION_ID, "   ")
        .await
        .expect_err("validation error");
    assert!(matches!(err, syllabot::error::SyllabotError::Validation(_)));

    // Nothing downstream was contacted.
    let requests = server.received_requests().await.expect("recorded requests");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn reset_clears_session_memory() {
    let server = MockServer::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    let key = session_key(COURSE_ID, SESSION_ID);
    store
        .save(
            &key,
            vec![ConversationTurn::user("q"), ConversationTurn::assistant("a")],
            std::time::Duration::from_secs(1800),
        )
        .await
        .expect("seed history");

    let service = chat_service(&server, store.clone());
    service.reset(COURSE_ID, SESSION_ID).await.expect("reset");

    assert!(store.get(&key).await.expect("history").is_empty());
}

#[tokio::test]
async fn llm_failure_surfaces_and_skips_memory_write() {
    let server = MockServer::start().await;
    let due = (Utc::now() + Duration::days(2)).to_rfc3339();

    mount_embeddings(&server).await;
    mount_query(
        &server,
        json!([index_match(
            "42-0",
            0.9,
            "assignment",
            &format!("Assignment: HW | Due: {due}"),
            Some(&due),
        )]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "boom", "type": "server_error"}
        })))
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySessionStore::new());
    let service = chat_service(&server, store.clone());

    let err = service
        .chat(COURSE_ID, SESSION_ID, "what's due?")
        .await
        .expect_err("llm failure");
    assert!(matches!(err, syllabot::error::SyllabotError::Llm(_)));

    let history = store
        .get(&session_key(COURSE_ID, SESSION_ID))
        .await
        .expect("history");
    assert!(history.is_empty());
}
