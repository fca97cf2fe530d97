//! Core business logic - framework-agnostic storefront operations.
//!
//! Everything in here is plain domain code: no Discord types, no HTTP. The bot
//! layer calls into these modules and renders whatever comes back.

/// Shopping cart store with durable state
pub mod cart;
/// Product catalog types and lookups
pub mod catalog;
/// Generated design history and the custom design type
pub mod design;
/// WhatsApp hand-off message composition and links
pub mod handoff;
/// Integer minor-unit money with locale display formatting
pub mod money;
/// Multi-step order flow state machine
pub mod order;
/// Flavor-matching quiz state machine
pub mod quiz;
/// Daily design-generation quota
pub mod quota;
