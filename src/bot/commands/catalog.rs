//! Catalog browsing commands - `menu` and `campaign`.
//!
//! Pure display over the static content: the product catalog with optional
//! category filtering, and the active promotional campaign.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::{catalog::CatalogItem, catalog::Category, order::QUOTE_PENDING_LABEL},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Category filter choices offered by `/menu`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum CategoryChoice {
        #[name = "Doğum Günü"]
        Birthday,
        #[name = "Düğün & Nişan"]
        Wedding,
        #[name = "Cupcake & Tatlılar"]
        Cupcake,
        #[name = "Özel Tasarım"]
        Special,
    }

    impl From<CategoryChoice> for Category {
        fn from(choice: CategoryChoice) -> Self {
            match choice {
                CategoryChoice::Birthday => Self::Birthday,
                CategoryChoice::Wedding => Self::Wedding,
                CategoryChoice::Cupcake => Self::Cupcake,
                CategoryChoice::Special => Self::Special,
            }
        }
    }

    fn price_text(item: &CatalogItem) -> String {
        item.price
            .map_or_else(|| QUOTE_PENDING_LABEL.to_string(), |p| p.to_string())
    }

    fn product_fields(items: &[&CatalogItem]) -> Vec<(String, String, bool)> {
        items
            .iter()
            .map(|item| {
                (
                    format!("{} ({})", item.name, price_text(item)),
                    item.description.clone(),
                    false,
                )
            })
            .collect()
    }

    /// Lists the product catalog, optionally filtered by category.
    #[poise::command(slash_command)]
    pub async fn menu(
        ctx: Context<'_>,
        #[description = "Sadece bu kategoriyi göster"] category: Option<CategoryChoice>,
    ) -> Result<()> {
        let catalog = &ctx.data().catalog;

        let (title, items) = match category {
            Some(choice) => {
                let category = Category::from(choice);
                (
                    format!("**Menü - {}**", category.label()),
                    catalog.in_category(category),
                )
            }
            None => ("**Menü**".to_string(), catalog.items().iter().collect()),
        };

        if items.is_empty() {
            ctx.say("Bu kategoride şu an ürünümüz yok.").await?;
            return Ok(());
        }

        let embed = serenity::CreateEmbed::default()
            .title(title)
            .color(0x00D9_7706) // Brand gold
            .fields(product_fields(&items))
            .footer(serenity::CreateEmbedFooter::new(
                "Sepete eklemek için /cart add, sipariş için /order start",
            ));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the active promotional campaign and its featured products.
    #[poise::command(slash_command)]
    pub async fn campaign(ctx: Context<'_>) -> Result<()> {
        let campaign = ctx.data().catalog.campaign();

        let items: Vec<&CatalogItem> = campaign.products.iter().collect();
        let embed = serenity::CreateEmbed::default()
            .title(format!("**{}** - {}", campaign.title, campaign.subtitle))
            .description(campaign.description.clone())
            .color(0x00E1_1D48) // Brand rose
            .image(campaign.image_url.clone())
            .fields(product_fields(&items))
            .footer(serenity::CreateEmbedFooter::new(campaign.button_text.clone()));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
