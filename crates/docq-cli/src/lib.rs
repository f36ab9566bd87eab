//! CLI interface for docq

mod intent;
mod ui;

pub use intent::{ColonPriceParser, IntentHandler, PriceParser, QuoteHandler};
pub use ui::{display_banner, is_exit, read_line};

// Re-export core types
pub use docq_core::{Error, Result};
