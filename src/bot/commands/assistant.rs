//! AI assistant commands - chat, structured suggestions, and the cake designer.
//!
//! All three defer the interaction while the single-attempt Gemini call runs,
//! which keeps the rest of the bot responsive and stops double submission
//! from the same control. Failures never reach the shopper as errors: chat
//! and suggestions substitute their fixed fallbacks, the designer simply
//! reports that nothing came out.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        ai::{designer, suggestion},
        bot::Context,
        core::design::HISTORY_CAPACITY,
        errors::Result,
    };
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use poise::serenity_prelude as serenity;
    use tracing::warn;

    /// Chats with the storefront assistant.
    #[poise::command(slash_command)]
    pub async fn ask(
        ctx: Context<'_>,
        #[description = "İpek Asistan'a mesajınız"] message: String,
    ) -> Result<()> {
        ctx.defer().await?;

        let reply = ctx.data().assistant.send(&message).await;
        ctx.say(reply.text).await?;
        Ok(())
    }

    /// Requests a personalized cake suggestion for an occasion.
    #[poise::command(slash_command)]
    pub async fn suggest(
        ctx: Context<'_>,
        #[description = "Etkinlik türü (örn: Doğum Günü, Nişan)"] event: String,
        #[description = "Kişi sayısı"] people: String,
        #[description = "Tercihleriniz (aroma, renk, tema...)"] preferences: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let outcome = suggestion::suggest_cake(
            ctx.data().gemini.as_ref(),
            &event,
            &people,
            preferences.as_deref().unwrap_or(""),
        )
        .await;

        let embed = serenity::CreateEmbed::default()
            .title("🎂 Size Özel Önerimiz")
            .description(outcome.suggestion.message)
            .color(0x00DB_2777) // Brand pink
            .field("İçerik & Aroma", outcome.suggestion.flavor, false)
            .field("Tasarım", outcome.suggestion.design, false)
            .footer(serenity::CreateEmbedFooter::new(
                "Beğendiyseniz /order start ile sipariş verebilirsiniz",
            ));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Generates a cake design image from a description.
    #[poise::command(slash_command)]
    pub async fn design(
        ctx: Context<'_>,
        #[description = "Hayalinizdeki pastayı tarif edin"] description: String,
    ) -> Result<()> {
        let data = ctx.data();
        let today = chrono::Local::now().date_naive();

        // Quota gate runs before any request is issued.
        let remaining = data.quota.remaining(today).await?;
        if remaining == 0 {
            ctx.say(format!(
                "Günlük tasarım hakkınız doldu (0/{}). Yarın yeniden bekleriz! 🌙",
                data.quota.limit()
            ))
            .await?;
            return Ok(());
        }

        ctx.defer().await?;

        let Some(generated) = designer::generate_cake_design(data.gemini.as_ref(), &description).await
        else {
            // A failed attempt costs no quota; the shopper can simply retry.
            ctx.say("Tasarım şu an oluşturulamadı; biraz sonra tekrar dener misiniz? 🙏")
                .await?;
            return Ok(());
        };

        let remaining = data.quota.record_use(today).await?;
        data.history.record(generated.clone(), chrono::Utc::now()).await?;
        data.latest_designs
            .write()
            .await
            .insert(ctx.author().id, generated.clone());

        let content = format!(
            "✨ **Hayalinizdeki Pasta**\n\"{description}\"\n\n\
             Günlük kalan hakkınız: {remaining}/{}\n\
             Bu tasarımı sipariş etmek için: `/order design`",
            data.quota.limit()
        );

        let mut reply = poise::CreateReply::default().content(content);
        match decode_data_uri(&generated.image) {
            Some(bytes) => {
                reply = reply.attachment(serenity::CreateAttachment::bytes(
                    bytes,
                    "pasta-tasarimi.png",
                ));
            }
            None => warn!("Generated design image was not a decodable data URI"),
        }

        ctx.send(reply).await?;
        Ok(())
    }

    /// Lists the shopper's recent designs.
    #[poise::command(slash_command)]
    pub async fn designs(ctx: Context<'_>) -> Result<()> {
        let items = ctx.data().history.list().await?;

        if items.is_empty() {
            ctx.say("Henüz kayıtlı tasarım yok; `/design` ile ilkini oluşturun. ✨")
                .await?;
            return Ok(());
        }

        let listing = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                format!(
                    "{}. \"{}\" - {}",
                    index + 1,
                    item.design.prompt,
                    item.timestamp.format("%d.%m.%Y %H:%M")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        ctx.say(format!(
            "🎨 **Son Tasarımlarınız** (en yeni {HISTORY_CAPACITY} tasarım saklanır)\n{listing}"
        ))
        .await?;
        Ok(())
    }

    /// Extracts the raw bytes from a `data:<mime>;base64,<payload>` string.
    fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
        let (_, payload) = uri.split_once("base64,")?;
        STANDARD.decode(payload).ok()
    }
}

// Re-export all commands
pub use inner::*;
