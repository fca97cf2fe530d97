//! General Discord commands - ping, help, and other utility commands.
//! Simple commands that provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong! 🍰").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**İpek Butik Tatlar**\n\
        Butik pastane asistanına hoş geldiniz! Komutlar:\n\n\
        **Vitrin**\n\
        • `/menu [kategori]` - Ürün kataloğunu listeler.\n\
        • `/campaign` - Aktif kampanyayı gösterir.\n\
        • `/quiz start` - 3 soruda damak zevkinize uygun pastayı bulur.\n\n\
        **Sepet**\n\
        • `/cart add <ürün>` - Sepete ürün ekler.\n\
        • `/cart show` / `/cart remove` / `/cart clear` - Sepeti yönetir.\n\
        • `/cart checkout` - Sepeti WhatsApp siparişine dönüştürür.\n\n\
        **Sipariş**\n\
        • `/order start <ürün>` - Sipariş akışını başlatır (boyut → bilgiler → ödeme).\n\
        • `/order design` - Son yapay zeka tasarımınız için sipariş açar.\n\
        • `/order status` - Mevcut adımı ve özeti gösterir.\n\n\
        **Yapay Zeka**\n\
        • `/ask <mesaj>` - İpek Asistan ile sohbet edin.\n\
        • `/suggest <etkinlik> <kişi>` - Size özel pasta önerisi alın.\n\
        • `/design <tarif>` - Hayalinizdeki pastayı görselleştirin (günde 3 hak).\n\
        • `/designs` - Son tasarımlarınızı listeler.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
