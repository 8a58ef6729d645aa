//! Collaborator traits the alert engine talks to

use async_trait::async_trait;
use newswatch_core::{RawFeedItem, Ticker};

use crate::error::NewsError;

/// Something that can list recent articles for a ticker
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, ticker: &Ticker) -> Result<Vec<RawFeedItem>, NewsError>;
}

/// Something that can deliver a rendered alert
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NewsError>;
}
