//! Order flow commands - the storefront's multi-step ordering wizard.
//!
//! One open flow per user: customize (size, flavor, note), contact details,
//! payment method, then confirmation. Advancing is blocked - silently, the
//! same way the original disabled its "continue" button - until the current
//! step validates. Confirming generates the order reference and the WhatsApp
//! hand-off link; the draft itself is never persisted and `/order cancel`
//! discards it.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{
            handoff,
            order::{OrderFlow, OrderStage, OrderSubject, PaymentMethod},
        },
        errors::Result,
    };
    use chrono::NaiveDate;

    /// Payment method choices offered by `/order payment`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum PaymentChoice {
        #[name = "Kredi / Banka Kartı"]
        CreditCard,
        #[name = "Havale / EFT (%5 indirimli)"]
        BankTransfer,
        #[name = "Kapıda Ödeme"]
        PayAtDoor,
    }

    impl From<PaymentChoice> for PaymentMethod {
        fn from(choice: PaymentChoice) -> Self {
            match choice {
                PaymentChoice::CreditCard => Self::CreditCard,
                PaymentChoice::BankTransfer => Self::BankTransfer,
                PaymentChoice::PayAtDoor => Self::PayAtDoor,
            }
        }
    }

    /// Accepts `2025-06-15` and `15.06.2025`.
    fn parse_date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
            .ok()
    }

    /// What still blocks the details step, as user-facing labels.
    fn missing_details(flow: &OrderFlow) -> Vec<&'static str> {
        let OrderStage::Details { form, .. } = flow.stage() else {
            return Vec::new();
        };

        let mut missing = Vec::new();
        if form.name.trim().chars().count() <= 2 {
            missing.push("Ad Soyad (en az 3 harf)");
        }
        if form.phone.trim().chars().count() <= 9 {
            missing.push("Telefon (en az 10 hane)");
        }
        if form.delivery_date.is_none() {
            missing.push("Teslimat tarihi");
        }
        if form.address.trim().chars().count() <= 10 {
            missing.push("Teslimat adresi (daha ayrıntılı)");
        }
        missing
    }

    /// Renders the order summary sidebar for the current stage.
    fn render_status(flow: &OrderFlow) -> String {
        let customization = flow.customization();
        let mut lines = vec![
            format!(
                "📋 **Sipariş Oluştur** - Adım {} / 3 ({})",
                flow.stage().number().min(3),
                flow.stage().label()
            ),
            format!("Ürün: **{}**", flow.subject().display_name()),
            format!("Boyut: {}", customization.size.label),
            format!("İçerik: {}", customization.flavor),
        ];
        if let Some(note) = &customization.note {
            lines.push(format!("Not: {note}"));
        }
        lines.push(format!("Toplam Tutar: **{}** (KDV Dahildir)", flow.price_display()));

        match flow.stage() {
            OrderStage::Customize { .. } => {
                lines.push(String::new());
                lines.push(
                    "Boyut, içerik ve pasta üzeri notu `/order customize` ile seçin, \
                     hazır olunca `/order next`."
                        .to_string(),
                );
            }
            OrderStage::Details { .. } => {
                let today = chrono::Local::now().date_naive();
                lines.push(String::new());
                lines.push(format!(
                    "ℹ️ Siparişlerinizi en erken 3 gün sonrası için oluşturabilirsiniz \
                     (önerilen en erken tarih: {}).",
                    OrderFlow::earliest_delivery_date(today).format("%d.%m.%Y")
                ));
                let missing = missing_details(flow);
                if missing.is_empty() {
                    lines.push("Bilgiler tamam; `/order next` ile ödemeye geçin.".to_string());
                } else {
                    lines.push(format!("Eksik bilgiler: {}", missing.join(", ")));
                    lines.push("`/order details` ile tamamlayabilirsiniz.".to_string());
                }
            }
            OrderStage::Payment { method, .. } => {
                lines.push(format!("Ödeme Yöntemi: {}", method.label()));
                lines.push(String::new());
                lines.push(
                    "`/order payment` ile yöntemi değiştirin, `/order confirm` ile siparişi \
                     onaylayın."
                        .to_string(),
                );
            }
            OrderStage::Confirmed(order) => {
                lines.push(String::new());
                lines.push(format!("✅ Sipariş numaranız: **{}**", order.reference));
            }
        }

        lines.join("\n")
    }

    /// Opens a fresh flow for `subject`, replacing any open one.
    async fn open_flow(ctx: Context<'_>, subject: OrderSubject) -> Result<()> {
        let data = ctx.data();
        let flow = OrderFlow::open(
            subject,
            data.content.default_size(),
            data.content.default_flavor().to_string(),
            data.content.contact.order_reference_prefix.clone(),
        );

        let rendered = render_status(&flow);
        data.orders.write().await.insert(ctx.author().id, flow);

        ctx.say(rendered).await?;
        Ok(())
    }

    /// Parent command for the order flow.
    #[poise::command(
        slash_command,
        subcommands(
            "order_start",
            "order_design",
            "order_customize",
            "order_details",
            "order_payment",
            "order_next",
            "order_back",
            "order_status",
            "order_confirm",
            "order_cancel"
        )
    )]
    pub async fn order(ctx: Context<'_>) -> Result<()> {
        let help_text = "Sipariş komutları:\n\
            `/order start <ürün>` - Katalog ürünü için sipariş başlat\n\
            `/order design` - Son yapay zeka tasarımınız için sipariş başlat\n\
            `/order customize` - Boyut, içerik ve notu seç\n\
            `/order details` - Teslimat bilgilerini gir\n\
            `/order payment` - Ödeme yöntemini seç\n\
            `/order next` / `/order back` - Adımlar arasında ilerle\n\
            `/order confirm` - Siparişi onayla (WhatsApp bağlantısı üretir)\n\
            `/order status` - Özeti göster, `/order cancel` - Vazgeç";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Starts an order for a catalog product.
    #[poise::command(slash_command, rename = "start")]
    pub async fn order_start(
        ctx: Context<'_>,
        #[description = "Sipariş edilecek ürün"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let Some(item) = ctx.data().catalog.by_name(&product).cloned() else {
            ctx.say(format!("❌ '{product}' adında bir ürünümüz yok.")).await?;
            return Ok(());
        };

        open_flow(ctx, OrderSubject::Item(item)).await
    }

    /// Starts an order for the user's most recent AI design.
    #[poise::command(slash_command, rename = "design")]
    pub async fn order_design(ctx: Context<'_>) -> Result<()> {
        let design = ctx
            .data()
            .latest_designs
            .read()
            .await
            .get(&ctx.author().id)
            .cloned();

        let Some(design) = design else {
            ctx.say("Henüz bir tasarımınız yok; önce `/design` ile hayalinizdeki pastayı oluşturun. ✨")
                .await?;
            return Ok(());
        };

        open_flow(ctx, OrderSubject::Custom(design)).await
    }

    /// Sets size, flavor, and the cake note (step 1).
    #[poise::command(slash_command, rename = "customize")]
    pub async fn order_customize(
        ctx: Context<'_>,
        #[description = "Pasta boyutu"]
        #[autocomplete = "autocomplete::autocomplete_size_label"]
        size: Option<String>,
        #[description = "İçerik & aroma"]
        #[autocomplete = "autocomplete::autocomplete_flavor"]
        flavor: Option<String>,
        #[description = "Pasta üzeri yazı / not"] note: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        if let Some(label) = size {
            let Some(tier) = data.sizes.iter().find(|s| s.label == label) else {
                drop(orders);
                ctx.say(format!("❌ '{label}' diye bir boyutumuz yok.")).await?;
                return Ok(());
            };
            if !flow.set_size(tier.clone()) {
                drop(orders);
                ctx.say("Özelleştirme adımı geride kaldı; `/order back` ile dönebilirsiniz.")
                    .await?;
                return Ok(());
            }
        }
        if let Some(flavor) = flavor {
            flow.set_flavor(flavor);
        }
        if let Some(note) = note {
            flow.set_note(Some(note));
        }

        let rendered = render_status(flow);
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Enters contact and delivery details (step 2).
    #[poise::command(slash_command, rename = "details")]
    pub async fn order_details(
        ctx: Context<'_>,
        #[description = "Ad Soyad"] name: Option<String>,
        #[description = "Telefon (örn: 0555 555 55 55)"] phone: Option<String>,
        #[description = "Teslimat tarihi (YYYY-AA-GG veya GG.AA.YYYY)"] date: Option<String>,
        #[description = "Teslimat adresi (Eryaman içi)"] address: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        if !matches!(flow.stage(), OrderStage::Details { .. }) {
            let hint = format!(
                "Şu an {} adımındasınız; bilgiler adımına `/order next` veya `/order back` ile gelin.",
                flow.stage().label()
            );
            drop(orders);
            ctx.say(hint).await?;
            return Ok(());
        }

        if let Some(name) = name {
            flow.set_name(name);
        }
        if let Some(phone) = phone {
            flow.set_phone(phone);
        }
        if let Some(raw) = date {
            let Some(parsed) = parse_date(&raw) else {
                drop(orders);
                ctx.say(format!("❌ '{raw}' tarihini anlayamadım; YYYY-AA-GG biçiminde yazar mısınız?"))
                    .await?;
                return Ok(());
            };
            flow.set_delivery_date(parsed);
        }
        if let Some(address) = address {
            flow.set_address(address);
        }

        let rendered = render_status(flow);
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Chooses the payment method (step 3).
    #[poise::command(slash_command, rename = "payment")]
    pub async fn order_payment(
        ctx: Context<'_>,
        #[description = "Ödeme yöntemi"] method: PaymentChoice,
    ) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        let rendered = if flow.set_payment_method(method.into()) {
            render_status(flow)
        } else {
            "Ödeme yöntemi, ödeme adımında seçilir; `/order next` ile ilerleyin.".to_string()
        };
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Moves to the next step when the current one validates.
    #[poise::command(slash_command, rename = "next")]
    pub async fn order_next(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        let rendered = if matches!(flow.stage(), OrderStage::Payment { .. }) {
            "Son adımdasınız; siparişi tamamlamak için `/order confirm` kullanın.".to_string()
        } else if flow.advance() {
            render_status(flow)
        } else {
            // Validation failed; the affordance stays disabled.
            let missing = missing_details(flow);
            if missing.is_empty() {
                "Bu adımdan ileri gidilemiyor.".to_string()
            } else {
                format!("Devam etmeden önce eksikler var: {}", missing.join(", "))
            }
        };
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Moves back to the previous step, keeping everything already entered.
    #[poise::command(slash_command, rename = "back")]
    pub async fn order_back(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        let rendered = if flow.back() {
            render_status(flow)
        } else {
            "İlk adımdasınız; geriye gidilecek bir yer yok.".to_string()
        };
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Shows the current step and the order summary.
    #[poise::command(slash_command, rename = "status")]
    pub async fn order_status(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let orders = data.orders.read().await;

        let Some(flow) = orders.get(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        let rendered = render_status(flow);
        drop(orders);
        ctx.say(rendered).await?;
        Ok(())
    }

    /// Confirms the order: generates the reference and the WhatsApp link.
    #[poise::command(slash_command, rename = "confirm")]
    pub async fn order_confirm(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let mut orders = data.orders.write().await;

        let Some(flow) = orders.get_mut(&ctx.author().id) else {
            drop(orders);
            ctx.say("Açık bir siparişiniz yok; `/order start` ile başlayın.").await?;
            return Ok(());
        };

        if !matches!(flow.stage(), OrderStage::Payment { .. }) {
            let hint = format!(
                "Onaylamadan önce adımları tamamlayın; şu an {} adımındasınız.",
                flow.stage().label()
            );
            drop(orders);
            ctx.say(hint).await?;
            return Ok(());
        }

        // From the payment stage this performs the one-time submission.
        flow.advance();
        let rendered = flow.confirmed().map(|order| {
            let message = handoff::order_message(flow.subject(), order);
            (order.reference.clone(), message)
        });
        drop(orders);

        let Some((reference, message)) = rendered else {
            ctx.say("Sipariş onaylanamadı, lütfen tekrar deneyin.").await?;
            return Ok(());
        };

        let link = handoff::whatsapp_link(&data.content.contact.whatsapp, &message)?;
        ctx.say(format!(
            "🎉 **Sipariş Kaydı Oluşturuldu!**\n\
             Sipariş Numaranız: **{reference}**\n\n\
             Son bir adım kaldı: onay için WhatsApp üzerinden bildiriniz.\n{link}"
        ))
        .await?;
        Ok(())
    }

    /// Closes the flow and discards the draft.
    #[poise::command(slash_command, rename = "cancel")]
    pub async fn order_cancel(ctx: Context<'_>) -> Result<()> {
        let removed = ctx.data().orders.write().await.remove(&ctx.author().id);

        if removed.is_some() {
            ctx.say("Sipariş taslağınız silindi. Kapımız her zaman açık! 🍰").await?;
        } else {
            ctx.say("Açık bir siparişiniz zaten yok.").await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
