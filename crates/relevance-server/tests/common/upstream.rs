//! Stub Reddit and OpenAI-compatible servers for end-to-end tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Texts containing this keyword embed to `[1, 0]`; everything else to `[0, 1]`.
pub const RELEVANT_KEYWORD: &str = "rust";

#[derive(Clone, Default)]
struct RedditState {
    listings: Arc<HashMap<String, Vec<Value>>>,
    failing: Arc<Vec<String>>,
    seen: Arc<Mutex<Vec<String>>>,
}

pub struct StubReddit {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<String>>>,
}

impl StubReddit {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request paths with query strings, in arrival order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// One listing child in Reddit's JSON shape.
pub fn reddit_post(title: &str, selftext: &str, num_comments: i64, created_utc: f64) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "title": title,
            "selftext": selftext,
            "url": format!("https://www.reddit.com/r/test/{}", title.len()),
            "score": 7,
            "num_comments": num_comments,
            "created_utc": created_utc,
            "permalink": format!("/r/test/comments/{}", title.len()),
            "stickied": false,
            "subreddit": "test"
        }
    })
}

async fn reddit_handler(
    State(state): State<RedditState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut query_pairs: Vec<_> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    query_pairs.sort();
    state
        .seen
        .lock()
        .unwrap()
        .push(format!("/r/{path}?{}", query_pairs.join("&")));

    let subreddit = path.split('/').next().unwrap_or_default().to_string();
    if state.failing.contains(&subreddit) {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response();
    }

    let children = state.listings.get(&subreddit).cloned().unwrap_or_default();
    Json(json!({"kind": "Listing", "data": {"children": children}})).into_response()
}

pub async fn spawn_stub_reddit(
    listings: HashMap<String, Vec<Value>>,
    failing: Vec<String>,
) -> StubReddit {
    let state = RedditState {
        listings: Arc::new(listings),
        failing: Arc::new(failing),
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let seen = state.seen.clone();

    let app = Router::new()
        .route("/r/{*path}", get(reddit_handler))
        .with_state(state);
    let addr = serve(app).await;

    StubReddit { addr, seen }
}

#[derive(Clone, Default)]
struct LlmState {
    chat_prompts: Arc<Mutex<Vec<String>>>,
}

pub struct StubLlm {
    pub addr: SocketAddr,
    chat_prompts: Arc<Mutex<Vec<String>>>,
}

impl StubLlm {
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn chat_prompts(&self) -> Vec<String> {
        self.chat_prompts.lock().unwrap().clone()
    }
}

async fn embeddings_handler(Json(body): Json<Value>) -> Json<Value> {
    let input = body["input"][0].as_str().unwrap_or_default().to_lowercase();
    let embedding = if input.contains(RELEVANT_KEYWORD) {
        [1.0, 0.0]
    } else {
        [0.0, 1.0]
    };
    Json(json!({
        "object": "list",
        "data": [{"object": "embedding", "embedding": embedding, "index": 0}],
        "model": body["model"]
    }))
}

async fn chat_handler(State(state): State<LlmState>, Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let relevant = prompt.contains("# Is Relevant: true");
    state.chat_prompts.lock().unwrap().push(prompt);

    let content = if relevant {
        "The post is about the topic."
    } else {
        "The post is unrelated to the topic."
    };
    Json(json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

pub async fn spawn_stub_llm() -> StubLlm {
    let state = LlmState::default();
    let chat_prompts = state.chat_prompts.clone();

    let app = Router::new()
        .route("/v1/embeddings", post(embeddings_handler))
        .route("/v1/chat/completions", post(chat_handler))
        .with_state(state);
    let addr = serve(app).await;

    StubLlm { addr, chat_prompts }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
