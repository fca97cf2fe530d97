//! WhatsApp hand-off - the storefront's "checkout".
//!
//! Orders and cart checkouts finish by composing a plain-text summary and
//! opening a pre-filled `wa.me` compose link; the conversation that follows is
//! the actual system of record. The application never submits an order to any
//! server and receives no delivery confirmation.

use crate::{
    core::{
        cart::CartLine,
        money::Money,
        order::{ConfirmedOrder, OrderSubject, QUOTE_PENDING_LABEL},
    },
    errors::{Error, Result},
};

/// Composes the order summary sent after the flow confirms.
#[must_use]
pub fn order_message(subject: &OrderSubject, order: &ConfirmedOrder) -> String {
    let note = order
        .customization
        .note
        .as_deref()
        .unwrap_or("Yok");

    format!(
        "Merhaba İpek Butik Tatlar! 🍰 Sipariş asistanınız üzerinden bir sipariş oluşturdum.\n\n\
         *Sipariş No:* {reference}\n\
         *Ürün:* {product}\n\
         *Boyut:* {size}\n\
         *Aroma:* {flavor}\n\
         *Tarih:* {date}\n\
         *Ad Soyad:* {name}\n\
         *Not:* {note}\n\
         *Adres:* {address}\n\
         *Ödeme Yöntemi:* {payment}\n\n\
         Siparişimi onaylayabilir misiniz?",
        reference = order.reference,
        product = subject.display_name(),
        size = order.customization.size.label,
        flavor = order.customization.flavor,
        date = order.contact.delivery_date.format("%d.%m.%Y"),
        name = order.contact.name,
        note = note,
        address = order.contact.address,
        payment = order.method.label(),
    )
}

/// Composes the cart checkout listing: numbered lines with prices and the
/// grouped total. Unpriced lines show the quote-pending label.
#[must_use]
pub fn cart_message(lines: &[CartLine], total: Money) -> String {
    let mut message =
        String::from("Merhaba İpek Butik Tatlar! 🍰 Şu ürünleri sipariş etmek istiyorum:\n\n");

    for (index, line) in lines.iter().enumerate() {
        let price = line
            .item
            .price
            .map_or_else(|| QUOTE_PENDING_LABEL.to_string(), |p| p.to_string());
        message.push_str(&format!("{}. {} - {}\n", index + 1, line.item.name, price));
    }

    message.push_str(&format!("\n*Toplam Tutar:* {total}\n"));
    message.push_str("\nSipariş detayları için yardımcı olabilir misiniz?");
    message
}

/// Builds the pre-filled `wa.me` compose link for `message`.
pub fn whatsapp_link(number: &str, message: &str) -> Result<String> {
    let url = reqwest::Url::parse_with_params(&format!("https://wa.me/{number}"), &[("text", message)])
        .map_err(|e| Error::Handoff {
            message: format!("invalid wa.me link: {e}"),
        })?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            cart::CartLine,
            order::{OrderFlow, PaymentMethod},
        },
        test_utils::{test_flow_for, test_item, unpriced_item},
    };
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn confirmed_flow() -> OrderFlow {
        let mut flow = test_flow_for(test_item(1, "Orman Meyveli Rüya", Some(1200)));
        flow.advance();
        flow.set_name("Ayşe Yılmaz".to_string());
        flow.set_phone("05551234567".to_string());
        flow.set_delivery_date(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        flow.set_address("Eryaman Mah. 42. Sokak No: 7".to_string());
        flow.advance();
        flow.set_payment_method(PaymentMethod::PayAtDoor);
        flow.advance();
        flow
    }

    #[test]
    fn test_order_message_carries_every_field() {
        let flow = confirmed_flow();
        let order = flow.confirmed().unwrap();
        let message = order_message(flow.subject(), order);

        assert!(message.contains(order.reference.as_str()));
        assert!(message.contains("*Ürün:* Orman Meyveli Rüya"));
        assert!(message.contains("*Boyut:* 4-6 Kişilik (15cm)"));
        assert!(message.contains("*Tarih:* 15.06.2025"));
        assert!(message.contains("*Ad Soyad:* Ayşe Yılmaz"));
        assert!(message.contains("*Not:* Yok"));
        assert!(message.contains("*Adres:* Eryaman Mah. 42. Sokak No: 7"));
        assert!(message.contains("*Ödeme Yöntemi:* Kapıda Ödeme"));
    }

    #[test]
    fn test_cart_message_lists_lines_and_total() {
        let lines = vec![
            CartLine {
                line_id: Uuid::new_v4(),
                item: test_item(1, "Orman Meyveli Rüya", Some(1200)),
                quantity: 1,
            },
            CartLine {
                line_id: Uuid::new_v4(),
                item: unpriced_item(9, "Kişiye Özel"),
                quantity: 1,
            },
        ];

        let message = cart_message(&lines, Money::from_lira(1200));

        assert!(message.contains("1. Orman Meyveli Rüya - 1.200 TL"));
        assert!(message.contains("2. Kişiye Özel - Fiyat Teklifi Alınacak"));
        assert!(message.contains("*Toplam Tutar:* 1.200 TL"));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link("905551234567", "Sipariş No: #IPEK-1234").unwrap();

        assert!(link.starts_with("https://wa.me/905551234567?text="));
        // The raw message must not leak unencoded.
        assert!(!link.contains("Sipariş No"));
        assert!(link.contains("%23IPEK-1234"));
    }
}
