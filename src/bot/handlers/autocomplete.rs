//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests valid product names, flavors, and size labels as the user types.
//! Everything comes from the static content configuration; there is nothing
//! to query.

use crate::bot::Context;

/// Suggests orderable product names (storefront plus campaign products).
pub async fn autocomplete_product_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = ctx
        .data()
        .catalog
        .product_names()
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(25) // Discord autocomplete limit
        .collect();

    matching.sort();
    matching
}

/// Suggests cake flavors from the configured list.
pub async fn autocomplete_flavor(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    ctx.data()
        .content
        .flavors
        .iter()
        .filter(|flavor| flavor.to_lowercase().contains(&partial_lower))
        .take(25)
        .cloned()
        .collect()
}

/// Suggests size tier labels in menu order.
pub async fn autocomplete_size_label(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    ctx.data()
        .sizes
        .iter()
        .filter(|size| size.label.to_lowercase().contains(&partial_lower))
        .map(|size| size.label.clone())
        .take(25)
        .collect()
}
