use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{GeminiError, Result};
use crate::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Anything able to turn a prompt into a generated response.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse>;
}

/// Google Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set a custom base URL (e.g., for proxies or alternative endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let request = GenerateContentRequest::from_prompt(prompt);

        log::debug!(
            "Gemini generateContent: model='{}', prompt_chars={}",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        log::debug!(
            "Gemini generateContent: {} candidate(s) received",
            parsed.candidates.len()
        );
        Ok(parsed)
    }
}

fn status_error(status: StatusCode, body: &str) -> GeminiError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => match envelope.error.status {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        _ => body.to_string(),
    };

    log::warn!("Gemini API returned HTTP {}: {}", status.as_u16(), detail);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return GeminiError::Auth(format!(
            "Gemini authentication failed: {detail}. Please check your API key."
        ));
    }

    GeminiError::Api(format!("HTTP {}: {detail}", status.as_u16()))
}
