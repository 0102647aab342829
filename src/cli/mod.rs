//! # CLI Module
//!
//! User-facing command implementations. Each command loads configuration,
//! wires up the Spotify client and the catalog store, delegates to the
//! management layer, and renders the result as tables or JSON. All
//! long-running network work shows a spinner, and fatal failures exit
//! through the crate's `error!` macro with a structured message rather
//! than a stack trace.

mod search;

pub use search::search;
