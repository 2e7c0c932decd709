//! Minimal client for the Gemini `generateContent` endpoint: wire types for
//! single-shot text generation, the [`TextGenerator`] seam the HTTP layer
//! depends on, and a reqwest-backed [`GeminiClient`] implementing it.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{GeminiClient, TextGenerator, DEFAULT_BASE_URL, DEFAULT_TEXT_MODEL};
pub use error::{GeminiError, Result};
pub use protocol::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, PromptFeedback,
};
