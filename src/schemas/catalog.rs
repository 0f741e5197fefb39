use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playable game exposed by the upstream catalog.
///
/// `updated_at` tracks the last content change and drives the `lastmod`
/// hint of the game's sitemap entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub slug: String,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A game category with a paginated listing.
///
/// `total_pages` counts the listing pages under
/// `/categories/{slug}/page/{n}`; a category with zero pages produces no
/// sitemap entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,

    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}
