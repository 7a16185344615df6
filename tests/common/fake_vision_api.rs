//! Fake OpenAI-compatible chat-completions server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `POST /chat/completions` — answers with the configured reply (or an
//!   error status) and records every request body it receives.
//!
//! # Example
//!
//! ```rust,no_run
//! use common::fake_vision_api::FakeVisionApi;
//!
//! let api = FakeVisionApi::start().await.unwrap();
//! api.reply_with(REPLY_COMPLETE).await;
//! let model = OpenAiVision::new("sk-test", &ModelConfig::default()).with_base_url(api.base_url());
//! ```

use async_trait::async_trait;
use airlog::vision::{ImageUpload, VisionError, VisionModel};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

enum Answer {
    Reply(String),
    Status(StatusCode, String),
}

struct ApiState {
    answer: Answer,
    requests: Vec<Value>,
}

/// Handle to the running fake model server.
pub struct FakeVisionApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeVisionApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            answer: Answer::Reply(String::new()),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/chat/completions", post(chat_completions))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer subsequent requests with `content` as the assistant message.
    pub async fn reply_with(&self, content: &str) {
        self.state.lock().await.answer = Answer::Reply(content.to_string());
    }

    /// Answer subsequent requests with an error status and body.
    pub async fn fail_with(&self, status: StatusCode, body: &str) {
        self.state.lock().await.answer = Answer::Status(status, body.to_string());
    }

    /// Request bodies received so far, oldest first.
    pub async fn requests(&self) -> Vec<Value> {
        self.state.lock().await.requests.clone()
    }
}

async fn chat_completions(
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests.push(body);
    match &state.answer {
        Answer::Reply(content) => (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
            })),
        )
            .into_response(),
        Answer::Status(status, body) => (*status, body.clone()).into_response(),
    }
}

// ---------------------------------------------------------------------------
// In-process stand-in
// ---------------------------------------------------------------------------

/// A [`VisionModel`] that answers every image with a fixed reply, for tests
/// that exercise the HTTP API without a network hop.
pub struct CannedModel {
    reply: Result<String, String>,
    calls: Mutex<Vec<ImageUpload>>,
}

impl CannedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<ImageUpload> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl VisionModel for CannedModel {
    async fn analyze(&self, image: &ImageUpload) -> Result<String, VisionError> {
        self.calls.lock().await.push(image.clone());
        self.reply.clone().map_err(VisionError::Api)
    }
}
