use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::PageStateProvider;

/// Point-in-time read of the page under test.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    /// Visible text of the page. Empty when extraction failed.
    pub content: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { url: url.into(), title: title.into(), content: content.into() }
    }

    /// Reads url, title and visible text from `provider`.
    ///
    /// A failed read leaves the corresponding field empty; scoring degrades
    /// but capture itself never fails.
    pub async fn capture<P: PageStateProvider + ?Sized>(provider: &P) -> Self {
        let url = provider.current_url().await.unwrap_or_else(|error| {
            warn!(error = ?error, "Failed to read page url");
            String::new()
        });
        let title = provider.current_title().await.unwrap_or_else(|error| {
            warn!(error = ?error, "Failed to read page title");
            String::new()
        });
        let content = provider.visible_text().await.unwrap_or_else(|error| {
            warn!(error = ?error, "Failed to extract visible page text");
            String::new()
        });

        Self { url, title, content }
    }
}
