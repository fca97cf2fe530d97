//! Gemini integrations - chat assistant, cake suggestions, image designer.
//!
//! Three single-attempt request/response operations against the Gemini REST
//! API. Nothing here retries, streams, or caches, and no failure escapes to a
//! shopper: every public operation returns a usable value tagged with whether
//! it came from the live service or a fixed fallback, so callers and tests can
//! tell the two paths apart while end-user behavior stays identical.

/// Conversational storefront assistant with a recoverable session
pub mod chat;
/// Image-based cake designer
pub mod designer;
/// Structured cake suggestions
pub mod suggestion;

use serde::{Deserialize, Serialize};

/// Default Gemini API endpoint; tests point this at a local mock server.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Text model used for chat and suggestions.
pub(crate) const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Image model used by the cake designer.
pub(crate) const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Whether a value came from the live service or the fixed fallback path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiSource {
    /// The external service produced this value
    Live,
    /// The fixed fallback was substituted after a failure
    Fallback,
}

/// HTTP client for the Gemini `generateContent` endpoints.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against the real Gemini endpoint.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Creates a client against a custom endpoint (used by tests).
    #[must_use]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// One `generateContent` exchange. Exactly one attempt; callers own the
    /// fallback behavior.
    pub(crate) async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, reqwest::Error> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        response.json().await
    }
}

// ---- generateContent wire types ----

/// Request body for `generateContent`.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversational turn (or the system instruction).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user-role turn with one text part.
    pub(crate) fn user_text(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// A role-less content holding one text part (system instructions).
    pub(crate) fn bare_text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a content turn: text or inline binary data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub(crate) fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }
}

/// Base64-encoded inline payload (generated images).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Generation options; only the structured-output fields are used.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Response body for `generateContent`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// The first candidate's content, if any.
    pub(crate) fn first_content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    /// The first text part of the first candidate, if any.
    pub(crate) fn first_text(&self) -> Option<&str> {
        self.first_content()?
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }
}
