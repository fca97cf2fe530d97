//! Conversational storefront assistant.
//!
//! Keeps one lazily created chat session per assistant instance: the running
//! history is replayed with every turn so the model keeps its context. The
//! session must survive the service misbehaving - on any failure it is
//! discarded (a fresh one is created on the next turn) and the shopper gets
//! the fixed apologetic reply instead of an error.

use crate::ai::{AiSource, Content, GenerateContentRequest, GeminiClient, Part, TEXT_MODEL};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Reply sent when the service fails; warm, on-brand, never an error.
pub const FALLBACK_REPLY: &str =
    "Şu an bağlantımda ufak bir sorun var, ama tatlılarımız harika! 🍰 Lütfen tekrar yazar mısın?";

/// The assistant's persona and pricing knowledge.
const SYSTEM_PERSONA: &str = "\
Sen İpek Butik Tatlar pastanesinin yapay zeka asistanısın. Adın İpek Asistan.
Yerimiz Ankara Eryaman'dadır.
Ürünlerimiz %100 el yapımı, doğal ve kişiye özeldir.
Fiyatlar hakkında yaklaşık bilgi verebilirsin:
- Cupcake setleri: ~450 TL
- Butik Pastalar: ~1200 TL'den başlar (kişi sayısı ve tasarıma göre artar)
- Nişan Pastaları: ~2500 TL civarı

Müşteriyle samimi, nazik ve iştah açıcı bir dille konuş.
Sipariş almak için net bir formumuz yok ancak WhatsApp'a yönlendirebilirsin.
Eğer kullanıcı özel bir tasarım isterse, hayalindeki pastayı tarif etmesini iste.";

/// One assistant reply with its provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    /// The reply text shown to the shopper
    pub text: String,
    /// Live service output or the fixed fallback
    pub source: AiSource,
}

/// The running conversation; opaque to callers.
#[derive(Debug, Default)]
struct ChatSession {
    history: Vec<Content>,
}

/// The storefront chat assistant.
pub struct ChatAssistant {
    client: Arc<GeminiClient>,
    session: Mutex<Option<ChatSession>>,
}

impl ChatAssistant {
    /// Creates an assistant; the session is created lazily on first use.
    #[must_use]
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self {
            client,
            session: Mutex::new(None),
        }
    }

    /// Sends one shopper message and returns the reply.
    ///
    /// Never fails: on any service error the session is discarded and the
    /// fixed fallback reply comes back tagged [`AiSource::Fallback`].
    pub async fn send(&self, message: &str) -> ChatReply {
        let mut session_slot = self.session.lock().await;
        let session = session_slot.get_or_insert_with(ChatSession::default);

        let user_turn = Content::user_text(message);
        let mut contents = session.history.clone();
        contents.push(user_turn.clone());

        let request = GenerateContentRequest {
            system_instruction: Some(Content::bare_text(SYSTEM_PERSONA)),
            contents,
            generation_config: None,
        };

        match self.client.generate(TEXT_MODEL, &request).await {
            Ok(response) => {
                if let Some(text) = response.first_text() {
                    session.history.push(user_turn);
                    session.history.push(Content {
                        role: Some("model".to_string()),
                        parts: vec![Part::text(text)],
                    });
                    return ChatReply {
                        text: text.to_string(),
                        source: AiSource::Live,
                    };
                }
                warn!("Chat turn returned no text; restarting session");
            }
            Err(e) => {
                warn!("Chat turn failed: {e}; restarting session");
            }
        }

        // Expired or broken session: drop it so the next turn starts fresh.
        *session_slot = None;
        ChatReply {
            text: FALLBACK_REPLY.to_string(),
            source: AiSource::Fallback,
        }
    }

    /// Number of turns currently remembered (both roles), for tests.
    #[cfg(test)]
    pub(crate) async fn remembered_turns(&self) -> usize {
        self.session
            .lock()
            .await
            .as_ref()
            .map_or(0, |s| s.history.len())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn assistant_for(server: &mockito::Server) -> ChatAssistant {
        let client = GeminiClient::with_base_url("test-key".to_string(), server.url());
        ChatAssistant::new(Arc::new(client))
    }

    fn text_reply(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_successful_turn_is_live_and_remembered() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_body(text_reply("Elbette, doğum günü pastalarımız 1200 TL'den başlıyor."))
            .create_async()
            .await;

        let assistant = assistant_for(&server);
        let reply = assistant.send("Doğum günü pastası fiyatı nedir?").await;

        assert_eq!(reply.source, AiSource::Live);
        assert!(reply.text.contains("1200 TL"));
        assert_eq!(assistant.remembered_turns().await, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_second_turn_replays_history() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(text_reply("İlk cevap"))
            .create_async()
            .await;

        let assistant = assistant_for(&server);
        assistant.send("İlk soru").await;

        // The second request must carry the first exchange.
        let second = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "İlk soru" }] },
                    { "role": "model", "parts": [{ "text": "İlk cevap" }] },
                    { "role": "user", "parts": [{ "text": "İkinci soru" }] },
                ]
            })))
            .with_status(200)
            .with_body(text_reply("İkinci cevap"))
            .create_async()
            .await;

        let reply = assistant.send("İkinci soru").await;
        assert_eq!(reply.text, "İkinci cevap");
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_and_resets_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let assistant = assistant_for(&server);
        let reply = assistant.send("Merhaba").await;

        assert_eq!(reply.source, AiSource::Fallback);
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(assistant.remembered_turns().await, 0, "session discarded");
    }

    #[tokio::test]
    async fn test_empty_candidates_fall_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "candidates": [] }).to_string())
            .create_async()
            .await;

        let assistant = assistant_for(&server);
        let reply = assistant.send("Merhaba").await;

        assert_eq!(reply.source, AiSource::Fallback);
    }
}
