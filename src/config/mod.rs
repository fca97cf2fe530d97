/// Static storefront content loading from config.toml
pub mod content;
/// Database configuration and connection management
pub mod database;
