//! News clients for ticker monitoring
//!
//! This crate provides the I/O collaborators of the alert engine:
//! - Google News RSS: per-ticker search feed (primary source)
//! - Telegram: alert delivery, with a dry-run mode when unconfigured

pub mod error;
pub mod google_news;
pub mod rss_parser;
pub mod source;
pub mod telegram;

pub use error::NewsError;
pub use google_news::GoogleNewsClient;
pub use source::{FeedSource, Notifier};
pub use telegram::TelegramNotifier;
