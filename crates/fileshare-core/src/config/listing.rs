//! Public listing configuration.

use serde::{Deserialize, Serialize};

/// Settings for the public file listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Files per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}
