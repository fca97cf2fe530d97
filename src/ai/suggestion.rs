//! Structured cake suggestions.
//!
//! Turns an event type, a party size, and free-text preferences into a
//! three-field suggestion, with the response shape enforced through the
//! requested output schema. Any failure - request error, empty response,
//! unparseable body - substitutes the fixed house suggestion; callers never
//! see an error.

use crate::ai::{
    AiSource, Content, GenerateContentRequest, GenerationConfig, GeminiClient, TEXT_MODEL,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// A cake suggestion: a greeting, a flavor, and a design description.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CakeSuggestion {
    /// Short friendly message addressed to the customer
    pub message: String,
    /// Suggested cake contents and flavor
    pub flavor: String,
    /// Suggested design and decoration details
    pub design: String,
}

/// A suggestion with its provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionOutcome {
    /// The suggestion shown to the shopper
    pub suggestion: CakeSuggestion,
    /// Live service output or the fixed fallback
    pub source: AiSource,
}

/// The fixed house suggestion used whenever the service fails.
#[must_use]
pub fn fallback_suggestion() -> CakeSuggestion {
    CakeSuggestion {
        message: "Size özel harika bir fikrimiz var!".to_string(),
        flavor: "Çikolata ve Taze Meyveler".to_string(),
        design: "Kişiye özel, konseptinize uygun şık bir butik pasta.".to_string(),
    }
}

/// Requests a suggestion for the given occasion.
///
/// Never fails; a degraded result is tagged [`AiSource::Fallback`].
pub async fn suggest_cake(
    client: &GeminiClient,
    event_type: &str,
    party_size: &str,
    preferences: &str,
) -> SuggestionOutcome {
    let prompt = format!(
        "Müşteri için pasta önerisi oluştur.\n\
         Etkinlik: {event_type}\n\
         Kişi Sayısı: {party_size}\n\
         Tercihler: {preferences}\n\n\
         Lütfen JSON formatında şu alanlarla yanıt ver:\n\
         - message: Müşteriye hitaben kısa, samimi bir öneri cümlesi.\n\
         - flavor: Önerilen pasta içeriği ve aroması.\n\
         - design: Önerilen pasta tasarımı ve süsleme detayları.\n\n\
         Yanıtın dili Türkçe olmalıdır."
    );

    let request = GenerateContentRequest {
        system_instruction: None,
        contents: vec![Content::user_text(&prompt)],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(json!({
                "type": "OBJECT",
                "properties": {
                    "message": { "type": "STRING" },
                    "flavor": { "type": "STRING" },
                    "design": { "type": "STRING" },
                },
                "required": ["message", "flavor", "design"],
            })),
        }),
    };

    let parsed = match client.generate(TEXT_MODEL, &request).await {
        Ok(response) => response
            .first_text()
            .and_then(|text| match serde_json::from_str::<CakeSuggestion>(text) {
                Ok(suggestion) => Some(suggestion),
                Err(e) => {
                    warn!("Suggestion response did not match schema: {e}");
                    None
                }
            }),
        Err(e) => {
            warn!("Suggestion request failed: {e}");
            None
        }
    };

    parsed.map_or_else(
        || SuggestionOutcome {
            suggestion: fallback_suggestion(),
            source: AiSource::Fallback,
        },
        |suggestion| SuggestionOutcome {
            suggestion,
            source: AiSource::Live,
        },
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> GeminiClient {
        GeminiClient::with_base_url("test-key".to_string(), server.url())
    }

    #[tokio::test]
    async fn test_live_suggestion_is_parsed_from_schema_output() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "candidates": [{ "content": { "parts": [{
                "text": "{\"message\":\"Nişanınıza çok yakışır!\",\"flavor\":\"Frambuazlı\",\"design\":\"Tek katlı, çiçekli\"}"
            }] } }]
        });
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let outcome = suggest_cake(&client_for(&server), "Nişan", "30", "frambuaz").await;

        assert_eq!(outcome.source, AiSource::Live);
        assert_eq!(outcome.suggestion.flavor, "Frambuazlı");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_error_yields_fixed_fallback_triple() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let outcome = suggest_cake(&client_for(&server), "Doğum Günü", "10", "").await;

        assert_eq!(outcome.source, AiSource::Fallback);
        assert_eq!(outcome.suggestion, fallback_suggestion());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [{ "content": { "parts": [{ "text": "not json at all" }] } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let outcome = suggest_cake(&client_for(&server), "Düğün", "100", "sade").await;

        assert_eq!(outcome.source, AiSource::Fallback);
        assert_eq!(outcome.suggestion, fallback_suggestion());
    }
}
