//! Shopping cart commands.
//!
//! The cart panel is shared storefront state: adding a product opens it, and
//! checkout turns the lines into a pre-filled WhatsApp message. Lines are
//! shown with 1-based positions; removal resolves a position to the
//! underlying line id, so removing one of two identical products never
//! touches the other.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{cart::CartLine, handoff, order::QUOTE_PENDING_LABEL},
        errors::Result,
    };

    fn render_lines(lines: &[CartLine]) -> String {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let price = line
                    .item
                    .price
                    .map_or_else(|| QUOTE_PENDING_LABEL.to_string(), |p| p.to_string());
                format!("{}. {} - {}", index + 1, line.item.name, price)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn render_cart(ctx: Context<'_>) -> String {
        let data = ctx.data();
        let lines = data.cart.lines().await;
        if lines.is_empty() {
            return "Sepetiniz henüz boş. Lezzetli koleksiyonumuza göz atmaya ne dersiniz? `/menu`"
                .to_string();
        }

        format!(
            "🛒 **Sepetim ({})**\n{}\n\n*Toplam Tutar:* **{}**",
            lines.len(),
            render_lines(&lines),
            data.cart.total().await
        )
    }

    /// Parent command for the shopping cart.
    #[poise::command(
        slash_command,
        subcommands("cart_add", "cart_show", "cart_remove", "cart_clear", "cart_toggle", "cart_checkout")
    )]
    pub async fn cart(ctx: Context<'_>) -> Result<()> {
        let help_text = "Sepet komutları:\n\
            `/cart add <ürün>` - Sepete ürün ekle\n\
            `/cart show` - Sepeti görüntüle\n\
            `/cart remove <sıra>` - Bir satırı çıkar\n\
            `/cart clear` - Sepeti boşalt\n\
            `/cart checkout` - WhatsApp siparişine dönüştür";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a product to the cart; duplicates become separate lines.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cart_add(
        ctx: Context<'_>,
        #[description = "Eklenecek ürünün adı"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let data = ctx.data();

        let Some(item) = data.catalog.by_name(&product).cloned() else {
            ctx.say(format!("❌ '{product}' adında bir ürünümüz yok.")).await?;
            return Ok(());
        };

        data.cart.add(item).await?;

        // Adding opens the cart panel, so show it right away.
        let rendered = render_cart(ctx).await;
        ctx.say(format!("✅ **{product}** sepete eklendi!\n\n{rendered}"))
            .await?;
        Ok(())
    }

    /// Shows the cart contents and total.
    #[poise::command(slash_command, rename = "show")]
    pub async fn cart_show(ctx: Context<'_>) -> Result<()> {
        let rendered = render_cart(ctx).await;
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Removes one line by its position in `/cart show`.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn cart_remove(
        ctx: Context<'_>,
        #[description = "Çıkarılacak satırın sırası (1'den başlar)"] position: usize,
    ) -> Result<()> {
        let data = ctx.data();
        let lines = data.cart.lines().await;

        let Some(line) = position.checked_sub(1).and_then(|i| lines.get(i)) else {
            ctx.say(format!("❌ Sepette {position} numaralı satır yok."))
                .await?;
            return Ok(());
        };

        data.cart.remove(line.line_id).await?;
        ctx.say(format!(
            "🗑️ **{}** sepetten çıkarıldı.\n\n{}",
            line.item.name,
            render_cart(ctx).await
        ))
        .await?;
        Ok(())
    }

    /// Empties the cart.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn cart_clear(ctx: Context<'_>) -> Result<()> {
        ctx.data().cart.clear().await?;
        ctx.say("🧹 Sepetiniz boşaltıldı.").await?;
        Ok(())
    }

    /// Opens or closes the cart panel.
    #[poise::command(slash_command, rename = "toggle")]
    pub async fn cart_toggle(ctx: Context<'_>) -> Result<()> {
        if ctx.data().cart.toggle_panel() {
            let rendered = render_cart(ctx).await;
            ctx.say(rendered).await?;
        } else {
            ctx.say("Sepet paneli kapatıldı.").await?;
        }
        Ok(())
    }

    /// Hands the cart off to WhatsApp as a pre-filled order message.
    #[poise::command(slash_command, rename = "checkout")]
    pub async fn cart_checkout(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let lines = data.cart.lines().await;

        if lines.is_empty() {
            ctx.say("Sepetiniz boş; önce `/cart add` ile ürün ekleyin.")
                .await?;
            return Ok(());
        }

        let message = handoff::cart_message(&lines, data.cart.total().await);
        let link = handoff::whatsapp_link(&data.content.contact.whatsapp, &message)?;

        ctx.say(format!(
            "Siparişinizi tamamlamak için son bir adım kaldı: aşağıdaki bağlantıyla \
             WhatsApp üzerinden bize iletin. 💬\n{link}"
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
