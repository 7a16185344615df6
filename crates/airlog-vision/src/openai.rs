//! OpenAI-compatible chat-completions client for image analysis.

use crate::error::{Result, VisionError};
use crate::{ImageUpload, VisionModel};
use airlog_core::config::ModelConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Analyzer prompt used when no `prompt_path` is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("prompts/maintenance_log_analyzer.txt");

const USER_INSTRUCTION: &str = "Please analyze this aircraft maintenance log image and extract the structured data according to the specified format.";

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// Vision model backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiVision {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: String,
}

impl OpenAiVision {
    /// Create a client with the given API key and model settings. The prompt
    /// is the built-in one; `prompt_path` is only honoured by [`from_env`].
    ///
    /// [`from_env`]: OpenAiVision::from_env
    pub fn new(api_key: impl Into<String>, config: &ModelConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.name.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Create from `OPENAI_API_KEY`, loading the configured prompt file if
    /// one is set.
    pub fn from_env(config: &ModelConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| VisionError::Config("OPENAI_API_KEY not set".into()))?;
        let client = Self::new(api_key, config);

        match &config.prompt_path {
            Some(path) => {
                let prompt = std::fs::read_to_string(path).map_err(|e| {
                    VisionError::Config(format!("cannot read prompt {}: {e}", path.display()))
                })?;
                Ok(client.with_system_prompt(prompt))
            }
            None => Ok(client),
        }
    }

    /// Set a custom base URL (for proxies or a local fake).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn request<'a>(&'a self, image_url: String) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(&self.system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: USER_INSTRUCTION },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image_url },
                        },
                    ]),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Inline `data:` URL carrying the image bytes.
pub fn data_url(image: &ImageUpload) -> String {
    format!("data:{};base64,{}", image.content_type, STANDARD.encode(&image.bytes))
}

#[async_trait]
impl VisionModel for OpenAiVision {
    async fn analyze(&self, image: &ImageUpload) -> Result<String> {
        let start = std::time::Instant::now();
        let request = self.request(data_url(image));

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "vision request failed");
                VisionError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "vision API error");
            return Err(VisionError::Api(format!("{status}: {error_text}")));
        }

        let chat_response: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(VisionError::EmptyReply)?;

        debug!(
            model = %self.model,
            image_bytes = image.bytes.len(),
            reply_len = content.len(),
            duration_ms = start.elapsed().as_millis(),
            "vision analysis complete"
        );

        Ok(content)
    }
}
