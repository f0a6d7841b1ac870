//! Story Ledger: creator and collector stories for token collections.
//!
//! Lets the creator of a collection, and whoever currently owns a token,
//! attach free-text stories to that token. Stories are published once to an
//! append-only sink and never stored, edited or deleted by the ledger.

pub mod core;
pub mod schema;
