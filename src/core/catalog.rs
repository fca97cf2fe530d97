//! Product catalog types and lookups.
//!
//! The catalog is static content: loaded once from `config.toml` at startup and
//! never mutated. Campaign products are part of the same namespace so shoppers
//! can order them like any other product.

use crate::core::money::Money;
use serde::{Deserialize, Serialize};

/// Product category tags used for catalog filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Birthday cakes
    Birthday,
    /// Wedding and engagement cakes
    Wedding,
    /// Cupcakes and small desserts
    Cupcake,
    /// Custom-design showcase pieces
    Special,
}

impl Category {
    /// Turkish display label, as shown on the storefront.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Birthday => "Doğum Günü",
            Self::Wedding => "Düğün & Nişan",
            Self::Cupcake => "Cupcake & Tatlılar",
            Self::Special => "Özel Tasarım",
        }
    }
}

/// One sellable product. Immutable once loaded.
///
/// `price` is `None` for quote-on-request pieces; such items contribute zero
/// to cart totals and are priced over WhatsApp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable catalog identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category tag
    pub category: Category,
    /// Price, absent for quote-on-request items
    pub price: Option<Money>,
    /// Product photo URL
    pub image_url: String,
    /// Short appetizing description
    pub description: String,
    /// Optional Instagram post link
    pub instagram_url: Option<String>,
}

/// The active promotional campaign with its own product list.
#[derive(Clone, Debug)]
pub struct Campaign {
    /// Campaign headline
    pub title: String,
    /// Small badge text (e.g. "Sınırlı Sayıda")
    pub subtitle: String,
    /// Longer marketing copy
    pub description: String,
    /// Call-to-action label
    pub button_text: String,
    /// Hero image URL
    pub image_url: String,
    /// Products featured by the campaign
    pub products: Vec<CatalogItem>,
}

/// The full catalog: storefront products plus the campaign's featured products.
#[derive(Clone, Debug)]
pub struct Catalog {
    storefront: Vec<CatalogItem>,
    campaign: Campaign,
}

impl Catalog {
    /// Assembles the catalog from the loaded content configuration.
    #[must_use]
    pub const fn new(storefront: Vec<CatalogItem>, campaign: Campaign) -> Self {
        Self {
            storefront,
            campaign,
        }
    }

    /// The storefront products in configuration order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.storefront
    }

    /// The active campaign.
    #[must_use]
    pub const fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// Storefront products in one category, preserving configuration order.
    #[must_use]
    pub fn in_category(&self, category: Category) -> Vec<&CatalogItem> {
        self.storefront
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Looks a product up by exact name, searching storefront then campaign.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.storefront
            .iter()
            .chain(self.campaign.products.iter())
            .find(|item| item.name == name)
    }

    /// Looks a product up by its catalog id, searching storefront then campaign.
    #[must_use]
    pub fn by_id(&self, id: i64) -> Option<&CatalogItem> {
        self.storefront
            .iter()
            .chain(self.campaign.products.iter())
            .find(|item| item.id == id)
    }

    /// The first storefront product; the quiz's last-resort recommendation.
    #[must_use]
    pub fn first(&self) -> Option<&CatalogItem> {
        self.storefront.first()
    }

    /// All orderable product names (storefront plus campaign), for autocomplete.
    #[must_use]
    pub fn product_names(&self) -> Vec<String> {
        self.storefront
            .iter()
            .chain(self.campaign.products.iter())
            .map(|item| item.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{test_catalog, test_item};

    #[test]
    fn test_in_category_preserves_order_and_filters() {
        let catalog = test_catalog();
        let birthday = catalog.in_category(Category::Birthday);

        assert_eq!(birthday.len(), 2);
        assert_eq!(birthday[0].name, "Orman Meyveli Rüya");
        assert_eq!(birthday[1].name, "Unicorn Temalı Pasta");
    }

    #[test]
    fn test_by_name_searches_campaign_products_too() {
        let catalog = test_catalog();

        assert_eq!(catalog.by_name("Makaron Kulesi").unwrap().id, 6);
        assert_eq!(catalog.by_name("Çilekli Charlotte").unwrap().id, 101);
        assert!(catalog.by_name("Yok Böyle Bir Pasta").is_none());
    }

    #[test]
    fn test_by_id_and_first() {
        let catalog = test_catalog();

        assert_eq!(catalog.by_id(3).unwrap().name, "Çikolatalı Cupcake Seti");
        assert_eq!(catalog.first().unwrap().id, 1);
    }

    #[test]
    fn test_item_serde_roundtrips_exactly() {
        let item = test_item(1, "Orman Meyveli Rüya", Some(1200));
        let json = serde_json::to_string(&item).unwrap();
        let back: CatalogItem = serde_json::from_str(&json).unwrap();

        assert_eq!(back, item);
        assert_eq!(back.price.unwrap().to_string(), "1.200 TL");
    }
}
