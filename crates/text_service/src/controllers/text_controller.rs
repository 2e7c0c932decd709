use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::extract_trace_id;
use crate::server::AppState;
use crate::services::sentence_limiter::limit_sentences;

/// Sentences kept from each generated reply.
pub const MAX_SENTENCES: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateTextRequest {
    /// The prompt to forward upstream; absent, `null` and empty all reject.
    pub fn into_prompt(self) -> Result<String> {
        match self.prompt {
            Some(prompt) if !prompt.is_empty() => Ok(prompt),
            _ => Err(AppError::MissingPrompt),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    pub text: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_text);
}

/// Generates text for a prompt and trims the reply to [`MAX_SENTENCES`].
#[post("/generate/text")]
pub async fn generate_text(
    req: HttpRequest,
    request: web::Json<GenerateTextRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let trace_id = extract_trace_id(&req).unwrap_or_else(|| "-".to_string());
    let prompt = request.into_inner().into_prompt()?;

    log::info!(
        "[{}] generate/text: prompt_chars={}, model='{}'",
        trace_id,
        prompt.chars().count(),
        state.model
    );

    let response = state.generator.generate_content(&prompt).await?;
    let raw_text = response.text()?;
    let text = limit_sentences(&raw_text, MAX_SENTENCES);

    log::debug!(
        "[{}] generate/text: raw_chars={}, returned_chars={}",
        trace_id,
        raw_text.chars().count(),
        text.chars().count()
    );

    Ok(HttpResponse::Ok().json(GenerateTextResponse { text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_prompt_is_accepted() {
        let request = GenerateTextRequest {
            prompt: Some("Write a haiku".to_string()),
        };
        assert_eq!(request.into_prompt().unwrap(), "Write a haiku");
    }

    #[test]
    fn whitespace_prompt_is_forwarded_as_is() {
        let request = GenerateTextRequest {
            prompt: Some("  ".to_string()),
        };
        assert_eq!(request.into_prompt().unwrap(), "  ");
    }

    #[test]
    fn empty_or_missing_prompt_is_rejected() {
        for prompt in [None, Some(String::new())] {
            let err = GenerateTextRequest { prompt }.into_prompt().unwrap_err();
            assert!(matches!(err, AppError::MissingPrompt));
        }
    }

    #[test]
    fn request_body_decodes_null_and_missing_prompt() {
        let missing: GenerateTextRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.prompt.is_none());

        let null: GenerateTextRequest = serde_json::from_str(r#"{"prompt": null}"#).unwrap();
        assert!(null.prompt.is_none());
    }
}
