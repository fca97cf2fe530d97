//! Static storefront content loading from config.toml.
//!
//! All content that drives the storefront - the catalog, flavors, size tiers,
//! the active campaign, the quiz, and the business contact details - is
//! configuration, not logic. It is loaded once at startup and never mutated.
//! Prices in the file are whole-lira integers; they convert to exact
//! minor-unit amounts here, on the way into the domain types.

use crate::{
    core::{
        catalog::{Campaign, Catalog, CatalogItem, Category},
        money::Money,
        order::SizeTier,
        quiz::QuizContent,
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Business contact details and order settings.
#[derive(Clone, Debug, Deserialize)]
pub struct ContactConfig {
    /// Display phone number
    pub phone: String,
    /// WhatsApp number in international digits-only form (for `wa.me` links)
    pub whatsapp: String,
    /// Street address
    pub address: String,
    /// Contact email
    pub email: String,
    /// Instagram profile URL
    pub instagram_url: String,
    /// Prefix for generated order references (e.g. `IPEK` -> `#IPEK-1234`)
    pub order_reference_prefix: String,
}

/// Configuration for a single product.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductConfig {
    /// Stable catalog identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category tag
    pub category: Category,
    /// Price in whole lira; omit for quote-on-request items
    #[serde(default)]
    pub price: Option<i64>,
    /// Product photo URL
    pub image_url: String,
    /// Short appetizing description
    pub description: String,
    /// Optional Instagram post link
    #[serde(default)]
    pub instagram_url: Option<String>,
}

impl ProductConfig {
    fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            price: self.price.map(Money::from_lira),
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            instagram_url: self.instagram_url.clone(),
        }
    }
}

/// Configuration for a single cake size tier.
#[derive(Clone, Debug, Deserialize)]
pub struct SizeTierConfig {
    /// Stable tier identifier
    pub id: u8,
    /// Display label
    pub label: String,
    /// Price modifier in whole lira
    pub price_mod: i64,
}

impl SizeTierConfig {
    fn to_tier(&self) -> SizeTier {
        SizeTier {
            id: self.id,
            label: self.label.clone(),
            price_mod: Money::from_lira(self.price_mod),
        }
    }
}

/// Configuration for the active promotional campaign.
#[derive(Clone, Debug, Deserialize)]
pub struct CampaignConfig {
    /// Campaign headline
    pub title: String,
    /// Small badge text
    pub subtitle: String,
    /// Longer marketing copy
    pub description: String,
    /// Call-to-action label
    pub button_text: String,
    /// Hero image URL
    pub image_url: String,
    /// Products featured by the campaign
    pub products: Vec<ProductConfig>,
}

/// The entire config.toml file.
#[derive(Clone, Debug, Deserialize)]
pub struct ContentConfig {
    /// Business contact details
    pub contact: ContactConfig,
    /// Storefront products
    pub products: Vec<ProductConfig>,
    /// Cake flavors offered in the order flow; the first is the default
    pub flavors: Vec<String>,
    /// Cake size tiers; the first is the default
    pub sizes: Vec<SizeTierConfig>,
    /// The active promotional campaign
    pub campaign: CampaignConfig,
    /// Quiz questions and the recommendation table
    pub quiz: QuizContent,
}

impl ContentConfig {
    /// Builds the catalog (storefront plus campaign products).
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        let campaign = Campaign {
            title: self.campaign.title.clone(),
            subtitle: self.campaign.subtitle.clone(),
            description: self.campaign.description.clone(),
            button_text: self.campaign.button_text.clone(),
            image_url: self.campaign.image_url.clone(),
            products: self.campaign.products.iter().map(ProductConfig::to_item).collect(),
        };

        Catalog::new(
            self.products.iter().map(ProductConfig::to_item).collect(),
            campaign,
        )
    }

    /// The size tiers as domain values, in menu order.
    #[must_use]
    pub fn size_tiers(&self) -> Vec<SizeTier> {
        self.sizes.iter().map(SizeTierConfig::to_tier).collect()
    }

    /// The default size tier offered by a fresh order flow.
    #[must_use]
    pub fn default_size(&self) -> SizeTier {
        self.sizes[0].to_tier()
    }

    /// The default flavor offered by a fresh order flow.
    #[must_use]
    pub fn default_flavor(&self) -> &str {
        &self.flavors[0]
    }

    fn validate(self) -> Result<Self> {
        if self.products.is_empty() {
            return Err(Error::Config {
                message: "config.toml defines no products".to_string(),
            });
        }
        if self.flavors.is_empty() {
            return Err(Error::Config {
                message: "config.toml defines no flavors".to_string(),
            });
        }
        if self.sizes.is_empty() {
            return Err(Error::Config {
                message: "config.toml defines no size tiers".to_string(),
            });
        }
        if self.quiz.questions.is_empty()
            || self.quiz.questions.iter().any(|q| q.options.is_empty())
        {
            return Err(Error::Config {
                message: "config.toml quiz needs at least one question, each with options"
                    .to_string(),
            });
        }
        Ok(self)
    }
}

/// Loads and validates storefront content from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or required fields are missing
/// - The content is unusable (no products, flavors, sizes, or questions)
pub fn load_content<P: AsRef<Path>>(path: P) -> Result<ContentConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read content file: {e}"),
    })?;

    let config: ContentConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    config.validate()
}

/// Loads storefront content from the default location (./config.toml).
pub fn load_default_content() -> Result<ContentConfig> {
    load_content("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::quiz::FlavorProfile;

    /// The shipped config.toml must parse and validate as-is.
    #[test]
    fn test_shipped_content_file_is_valid() {
        let config: ContentConfig = toml::from_str(include_str!("../../config.toml")).unwrap();
        let config = config.validate().unwrap();

        assert_eq!(config.products.len(), 6);
        assert_eq!(config.sizes.len(), 4);
        assert_eq!(config.quiz.questions.len(), 3);
        assert_eq!(config.campaign.products.len(), 3);

        // Every quiz recommendation must resolve against the catalog.
        let catalog = config.catalog();
        for profile in FlavorProfile::ALL {
            let name = config.quiz.recommendations.get(&profile).unwrap();
            assert!(catalog.by_name(name).is_some(), "unknown product: {name}");
        }
    }

    #[test]
    fn test_prices_convert_to_minor_units() {
        let config: ContentConfig = toml::from_str(include_str!("../../config.toml")).unwrap();
        let catalog = config.catalog();

        let item = catalog.by_name("Orman Meyveli Rüya").unwrap();
        assert_eq!(item.price, Some(Money::from_lira(1200)));
        assert_eq!(item.price.unwrap().minor_units(), 120_000);

        let tiers = config.size_tiers();
        assert_eq!(tiers[1].price_mod, Money::from_lira(250));
    }

    #[test]
    fn test_parse_minimal_content() {
        let toml_str = r#"
            flavors = ["Vanilyalı & Çilekli"]

            [contact]
            phone = "0555 123 45 67"
            whatsapp = "905551234567"
            address = "Ankara"
            email = "test@example.com"
            instagram_url = "https://instagram.com/test"
            order_reference_prefix = "IPEK"

            [[products]]
            id = 1
            name = "Test Pasta"
            category = "birthday"
            price = 1200
            image_url = "https://example.com/p.jpg"
            description = "Test"

            [[sizes]]
            id = 1
            label = "4-6 Kişilik (15cm)"
            price_mod = 0

            [campaign]
            title = "Kampanya"
            subtitle = "Yeni"
            description = "Açıklama"
            button_text = "İncele"
            image_url = "https://example.com/c.jpg"
            products = []

            [[quiz.questions]]
            text = "Soru?"
            options = [{ text = "Cevap", profile = "chocolate" }]

            [quiz.recommendations]
            chocolate = "Test Pasta"
        "#;

        let config: ContentConfig = toml::from_str(toml_str).unwrap();
        let config = config.validate().unwrap();

        assert_eq!(config.products[0].price, Some(1200));
        assert_eq!(config.products[0].category, Category::Birthday);
        assert_eq!(config.default_flavor(), "Vanilyalı & Çilekli");
        assert_eq!(config.default_size().id, 1);
        assert!(config.default_size().price_mod.is_zero());

        // An unpriced product is quote-on-request.
        let item = ProductConfig {
            id: 9,
            name: "Kişiye Özel".to_string(),
            category: Category::Special,
            price: None,
            image_url: String::new(),
            description: String::new(),
            instagram_url: None,
        }
        .to_item();
        assert!(item.price.is_none());
    }

    #[test]
    fn test_empty_products_rejected() {
        let toml_str = r#"
            products = []
            flavors = ["Vanilya"]
            sizes = []

            [contact]
            phone = ""
            whatsapp = ""
            address = ""
            email = ""
            instagram_url = ""
            order_reference_prefix = "IPEK"

            [campaign]
            title = ""
            subtitle = ""
            description = ""
            button_text = ""
            image_url = ""
            products = []

            [quiz]
            questions = []
            recommendations = {}
        "#;

        let config: ContentConfig = toml::from_str(toml_str).unwrap();
        let result = config.validate();
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
