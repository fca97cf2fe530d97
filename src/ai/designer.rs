//! Image-based cake designer.
//!
//! Wraps the shopper's free-text description in the house food-photography
//! style template before sending, so every render comes back looking like a
//! professional patisserie photo rather than an illustration. Returns the
//! embeddable image on success and `None` on any failure or empty response;
//! the daily quota is enforced by the caller before a request is issued.

use crate::{
    ai::{Content, GenerateContentRequest, GeminiClient, IMAGE_MODEL},
    core::design::CustomDesign,
};
use tracing::warn;

/// Builds the full generation prompt around the shopper's description.
fn styled_prompt(description: &str) -> String {
    format!(
        "Generate a professional, high-definition photograph of a boutique cake \
         described as: \"{description}\".\n\n\
         CRITICAL VISUAL GUIDELINES:\n\
         1. Photorealism: The image MUST look like a real photo taken by a professional \
         food photographer. No illustrations, no 3D renders, no cartoons.\n\
         2. Lighting: Soft, diffused natural window light coming from the side \
         (rembrandt lighting) to create gentle highlights on the frosting and depth in \
         shadows. Avoid harsh flash.\n\
         3. Textures: Frosting/buttercream must look creamy, smooth, or piped with \
         visible texture, not plastic. Sponge, if visible, must look moist, airy, and \
         soft. Glaze/ganache glossy and reflective. Fruits fresh, glistening with \
         natural moisture.\n\
         4. Camera: Shot with a 50mm or 85mm prime lens at f/2.8. Sharp focus on the \
         front details of the cake, with a creamy, soft background blur (bokeh).\n\
         5. Setting: An elegant, clean marble countertop or a rustic wooden table in a \
         bright, airy patisserie environment. Neutral tones.\n\
         6. Composition: Centered or slightly off-center, plated on a beautiful ceramic \
         cake stand or plate.\n\n\
         NEGATIVE PROMPT (Implicit): Do not include text, watermarks, writing on the \
         cake, blurry details, distorted shapes, oversaturated colors, plastic-looking \
         surfaces, people, or hands."
    )
}

/// Generates a cake design image for `description`.
///
/// Returns `None` on request failure or when the response carries no image;
/// the shopper simply sees nothing new and can try again.
pub async fn generate_cake_design(
    client: &GeminiClient,
    description: &str,
) -> Option<CustomDesign> {
    let request = GenerateContentRequest {
        system_instruction: None,
        contents: vec![Content::user_text(&styled_prompt(description))],
        generation_config: None,
    };

    let response = match client.generate(IMAGE_MODEL, &request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Design generation failed: {e}");
            return None;
        }
    };

    let image = response.first_content().and_then(|content| {
        content.parts.iter().find_map(|part| {
            part.inline_data.as_ref().map(|inline| {
                let mime = inline.mime_type.as_deref().unwrap_or("image/png");
                format!("data:{mime};base64,{}", inline.data)
            })
        })
    });

    match image {
        Some(image) => Some(CustomDesign {
            image,
            prompt: description.to_string(),
        }),
        None => {
            warn!("Design generation returned no image data");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> GeminiClient {
        GeminiClient::with_base_url("test-key".to_string(), server.url())
    }

    #[tokio::test]
    async fn test_inline_image_becomes_custom_design() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your cake" },
                { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
            ] } }]
        });
        // The request must wrap the description in the style template.
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::Regex("unicorn temalı".to_string()))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let design = generate_cake_design(&client_for(&server), "unicorn temalı pasta")
            .await
            .unwrap();

        assert_eq!(design.image, "data:image/png;base64,QUJD");
        assert_eq!(design.prompt, "unicorn temalı pasta");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_image_data_returns_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [{ "content": { "parts": [{ "text": "sorry, no image" }] } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let design = generate_cake_design(&client_for(&server), "pasta").await;
        assert!(design.is_none());
    }

    #[tokio::test]
    async fn test_request_failure_returns_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let design = generate_cake_design(&client_for(&server), "pasta").await;
        assert!(design.is_none());
    }
}
