//! Sitemap URL generation.
//!
//! `generate` expands the site's crawlable URL space as a deterministic
//! cross-product of locales, static pages, games and paginated category
//! listings. The function is pure: upstream fetching and the fail-safe
//! policy on fetch errors belong to the caller.

pub mod xml;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schemas::{Category, Game};

// Crawl-priority mapping. Crawlers treat these as relative importance
// hints within the site, so the ordering matters more than the values.
const PRIORITY_ROOT: f32 = 1.0;
const PRIORITY_GAME: f32 = 0.8;
const PRIORITY_GAME_LOCALIZED: f32 = 0.7;
const PRIORITY_CATEGORY_PAGE: f32 = 0.6;
const PRIORITY_ROOT_LOCALIZED: f32 = 0.8;
const PRIORITY_STATIC_PAGE: f32 = 0.5;
const PRIORITY_STATIC_PAGE_LOCALIZED: f32 = 0.6;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` record of the sitemap protocol.
#[derive(Serialize, Clone, Debug)]
pub struct SitemapEntry {
    pub url: String,

    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,

    #[serde(rename = "changeFrequency")]
    pub change_frequency: ChangeFrequency,

    pub priority: f32,
}

/// Generation inputs that are fixed per deployment.
///
/// Passed explicitly instead of read from ambient globals so the generator
/// can be exercised with arbitrary locale and page sets.
#[derive(Debug, Clone)]
pub struct SitemapConfig {
    base_url: String,
    locales: Vec<String>,
    static_pages: Vec<String>,
}

impl SitemapConfig {
    /// Build a config. The base URL is normalized so that every emitted URL
    /// joins path segments with exactly one `/`.
    pub fn new(base_url: &str, locales: &[&str], static_pages: &[&str]) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            locales: locales.iter().map(|l| l.to_string()).collect(),
            static_pages: static_pages.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Expand the full list of sitemap entries.
///
/// Emission order follows the crawl-priority signaling of the site: root,
/// game pages with their localized variants, category pagination, localized
/// roots, then static pages plain and localized. Entries for games and
/// categories with an empty slug are dropped rather than emitted as
/// malformed URLs; `now` stamps every entry that has no authoritative
/// per-entity timestamp.
pub fn generate(
    config: &SitemapConfig,
    games: &[Game],
    categories: &[Category],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base = config.base_url.as_str();
    let mut entries = Vec::with_capacity(
        1 + games.len() * (1 + config.locales.len())
            + categories
                .iter()
                .map(|c| c.total_pages as usize)
                .sum::<usize>()
            + config.locales.len() * (1 + config.static_pages.len())
            + config.static_pages.len(),
    );

    entries.push(SitemapEntry {
        url: base.to_string(),
        last_modified: now,
        change_frequency: ChangeFrequency::Weekly,
        priority: PRIORITY_ROOT,
    });

    for game in games.iter().filter(|game| !game.slug.is_empty()) {
        entries.push(SitemapEntry {
            url: format!("{}/games/{}", base, game.slug),
            last_modified: game.updated_at,
            change_frequency: ChangeFrequency::Daily,
            priority: PRIORITY_GAME,
        });

        // Every locale gets its own variant, the default one included:
        // /games/{slug} and /en/games/{slug} are distinct canonical URLs.
        for locale in &config.locales {
            entries.push(SitemapEntry {
                url: format!("{}/{}/games/{}", base, locale, game.slug),
                last_modified: game.updated_at,
                change_frequency: ChangeFrequency::Daily,
                priority: PRIORITY_GAME_LOCALIZED,
            });
        }
    }

    for category in categories.iter().filter(|cat| !cat.slug.is_empty()) {
        for page in 1..=category.total_pages {
            entries.push(SitemapEntry {
                url: format!("{}/categories/{}/page/{}", base, category.slug, page),
                last_modified: now,
                change_frequency: ChangeFrequency::Weekly,
                priority: PRIORITY_CATEGORY_PAGE,
            });
        }
    }

    for locale in &config.locales {
        entries.push(SitemapEntry {
            url: format!("{}/{}", base, locale),
            last_modified: now,
            change_frequency: ChangeFrequency::Weekly,
            priority: PRIORITY_ROOT_LOCALIZED,
        });
    }

    for page in &config.static_pages {
        entries.push(SitemapEntry {
            url: format!("{}/{}", base, page),
            last_modified: now,
            change_frequency: ChangeFrequency::Monthly,
            priority: PRIORITY_STATIC_PAGE,
        });
    }

    for locale in &config.locales {
        for page in &config.static_pages {
            entries.push(SitemapEntry {
                url: format!("{}/{}/{}", base, locale, page),
                last_modified: now,
                change_frequency: ChangeFrequency::Monthly,
                priority: PRIORITY_STATIC_PAGE_LOCALIZED,
            });
        }
    }

    entries
}
