//! Binary entry point: wires configuration, persistence, the Gemini client,
//! and the Discord bot together.

use dotenvy::dotenv;
use ipek_butik::{
    ai::GeminiClient,
    bot::{self, BotData},
    config,
    core::cart::CartStore,
    errors::{Error, Result},
    store::{SqliteStateStore, StateStore},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the storefront content (catalog, sizes, quiz, contact)
    let content = Arc::new(
        config::content::load_default_content()
            .inspect_err(|e| error!("Failed to load config.toml: {e}"))?,
    );
    info!(
        "Loaded storefront content: {} products, {} flavors.",
        content.products.len(),
        content.flavors.len()
    );

    // 4. Initialize the database and durable state store
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    config::database::create_tables(&db).await?;
    let state: Arc<dyn StateStore> = Arc::new(SqliteStateStore::new(db));

    // 5. Restore the cart from the previous session
    let cart = CartStore::load(Arc::clone(&state)).await?;
    info!("Cart restored with {} line(s).", cart.count().await);

    // 6. Gemini client; the key is read directly before use, never stored in config
    let api_key = env::var("GEMINI_API_KEY")
        .inspect_err(|e| error!("GEMINI_API_KEY not found: {e}"))
        .map_err(Error::EnvVar)?;
    let gemini = GeminiClient::new(api_key);

    // 7. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let data = BotData::new(content, state, cart, gemini);
    bot::run_bot(token, data).await
}
