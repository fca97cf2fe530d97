//! Discord command implementations for the storefront.
//!
//! Commands are grouped the way shoppers meet them: browsing, the cart, the
//! order flow, the quiz, and the AI assistants. Every command is a thin shell
//! over `core`/`ai` functions.

/// AI assistant commands - ask, suggest, design, designs
pub mod assistant;
/// Catalog browsing commands - menu and campaign
pub mod catalog;
/// Shopping cart commands
pub mod cart;
/// General commands - ping and help
pub mod general;
/// Order flow commands
pub mod order;
/// Flavor quiz commands
pub mod quiz;

pub use assistant::*;
pub use catalog::*;
pub use cart::*;
pub use general::*;
pub use order::*;
pub use quiz::*;
