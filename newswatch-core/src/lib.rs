//! Core types for the newswatch alert engine
//!
//! This crate defines the shared data structures used across the workspace:
//! watched tickers, fetched and scored news items, and the identity helpers
//! that turn an article link into a stable content hash.

pub mod error;
pub mod identity;
pub mod news;

pub use error::{WatchError, WatchResult};
pub use identity::{canonicalize, content_hash, domain_of, signature_hash};
pub use news::{NewsItem, RawFeedItem, Ticker};
