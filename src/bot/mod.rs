//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the storefront, including
//! all slash commands, autocomplete handlers, and shared bot context. The bot
//! layer holds no business logic: commands delegate to `core` and `ai` and
//! render whatever comes back.

/// Discord command implementations (catalog, cart, order, quiz, assistant)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    ai::{GeminiClient, chat::ChatAssistant},
    config::content::ContentConfig,
    core::{
        cart::CartStore, catalog::Catalog, design::CustomDesign, design::DesignHistory,
        order::OrderFlow, order::SizeTier, quiz::FlavorQuiz, quota::DesignQuota,
    },
    errors,
    store::StateStore,
};
use poise::serenity_prelude as serenity;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::info;

/// Shared data available to all bot commands.
///
/// Shopper-wide state (cart, quota, design history) is durable through the
/// state store; per-user interactive state (order flows, quiz sessions, the
/// latest generated design) lives in these maps and dies with the process,
/// exactly like the original's modal sessions died with the browser tab.
pub struct BotData {
    /// Static storefront content
    pub content: Arc<ContentConfig>,
    /// The catalog assembled from the content
    pub catalog: Catalog,
    /// The size tiers as domain values, in menu order
    pub sizes: Vec<SizeTier>,
    /// The shared shopping cart
    pub cart: CartStore,
    /// Daily design-generation quota
    pub quota: DesignQuota,
    /// Recently generated designs
    pub history: DesignHistory,
    /// The chat assistant with its recoverable session
    pub assistant: ChatAssistant,
    /// Gemini client shared by the suggestion and designer commands
    pub gemini: Arc<GeminiClient>,
    /// Open order flows, one per user
    pub orders: RwLock<HashMap<serenity::UserId, OrderFlow>>,
    /// Quiz sessions, one per user
    pub quizzes: RwLock<HashMap<serenity::UserId, FlavorQuiz>>,
    /// Each user's most recent generated design, orderable via `/order design`
    pub latest_designs: RwLock<HashMap<serenity::UserId, CustomDesign>>,
}

impl BotData {
    /// Assembles the bot context from its initialized parts.
    #[must_use]
    pub fn new(
        content: Arc<ContentConfig>,
        state: Arc<dyn StateStore>,
        cart: CartStore,
        gemini: GeminiClient,
    ) -> Self {
        let gemini = Arc::new(gemini);
        Self {
            catalog: content.catalog(),
            sizes: content.size_tiers(),
            content,
            cart,
            quota: DesignQuota::new(Arc::clone(&state)),
            history: DesignHistory::new(state),
            assistant: ChatAssistant::new(Arc::clone(&gemini)),
            gemini,
            orders: RwLock::new(HashMap::new()),
            quizzes: RwLock::new(HashMap::new()),
            latest_designs: RwLock::new(HashMap::new()),
        }
    }
}

/// Error type Poise threads through all commands.
pub type Error = errors::Error;
/// Context alias used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx
                .say("Bir şeyler ters gitti, lütfen tekrar dener misiniz? 🙏")
                .await
            {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Starts the Discord client and serves commands until shutdown.
pub async fn run_bot(token: String, data: BotData) -> errors::Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::menu(),
                commands::campaign(),
                commands::cart(),
                commands::order(),
                commands::quiz(),
                commands::ask(),
                commands::suggest(),
                commands::design(),
                commands::designs(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    client.start().await.map_err(Error::from)
}
