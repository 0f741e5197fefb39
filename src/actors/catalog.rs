use std::error::Error;
use std::fmt;
use std::time::Duration;

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware as HttpClient};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

use actix::prelude::*;

use crate::actors::HealthCommand;
use crate::schemas::{Category, Game};

#[derive(Debug, Clone)]
pub struct CatalogError {
    pub message: String,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CatalogError {}

/// Actor owning the upstream catalog reads.
///
/// Both listings are re-fetched on every command: the catalog holds no
/// cache, so concurrent sitemap generations never observe stale or shared
/// mutable state.
pub struct CatalogActor {
    base_url: String,
    timeout: u64,
}

impl CatalogActor {
    pub fn new(base_url: &str, timeout: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Actor for CatalogActor {
    type Context = Context<Self>;
}

impl Handler<HealthCommand> for CatalogActor {
    type Result = ResponseFuture<bool>;

    fn handle(&mut self, _msg: HealthCommand, _: &mut Self::Context) -> Self::Result {
        Box::pin(async move { true })
    }
}

#[derive(Message, Debug)]
#[rtype(result = "Result<Vec<Game>, CatalogError>")]
pub struct ListGamesCommand;

impl Handler<ListGamesCommand> for CatalogActor {
    type Result = ResponseFuture<Result<Vec<Game>, CatalogError>>;

    fn handle(&mut self, _msg: ListGamesCommand, _: &mut Self::Context) -> Self::Result {
        let url = format!("{}/games", self.base_url);
        let timeout = self.timeout;

        Box::pin(async move {
            let records = fetch_listing(&url, timeout).await?;
            let games: Vec<Game> = decode_records(records, "game")
                .into_iter()
                .filter(|game: &Game| keep_slugged(&game.slug, "game"))
                .collect();
            Ok(games)
        })
    }
}

#[derive(Message, Debug)]
#[rtype(result = "Result<Vec<Category>, CatalogError>")]
pub struct ListCategoriesCommand;

impl Handler<ListCategoriesCommand> for CatalogActor {
    type Result = ResponseFuture<Result<Vec<Category>, CatalogError>>;

    fn handle(&mut self, _msg: ListCategoriesCommand, _: &mut Self::Context) -> Self::Result {
        let url = format!("{}/categories", self.base_url);
        let timeout = self.timeout;

        Box::pin(async move {
            let records = fetch_listing(&url, timeout).await?;
            let categories: Vec<Category> = decode_records(records, "category")
                .into_iter()
                .filter(|cat: &Category| keep_slugged(&cat.slug, "category"))
                .collect();
            Ok(categories)
        })
    }
}

fn client() -> HttpClient {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(reqwest::Client::new())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}

async fn fetch_listing(url: &str, timeout: u64) -> Result<Vec<Value>, CatalogError> {
    let resp = client()
        .get(url)
        .timeout(Duration::from_secs(timeout))
        .send()
        .await
        .map_err(|error| CatalogError {
            message: format!("Failed to fetch {}: {}", url, error),
        })?;

    if !resp.status().is_success() {
        return Err(CatalogError {
            message: format!("Listing {} returned {}", url, resp.status()),
        });
    }

    resp.json::<Vec<Value>>().await.map_err(|error| CatalogError {
        message: format!("Failed to decode {}: {}", url, error),
    })
}

/// Decode records one by one so a single malformed row (missing slug,
/// negative page count, invalid timestamp) is dropped instead of failing
/// the whole listing.
fn decode_records<T: DeserializeOwned>(records: Vec<Value>, kind: &str) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<T>(record.clone()) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!("Skipping malformed {} record {}: {}", kind, record, error);
                None
            }
        })
        .collect()
}

fn keep_slugged(slug: &str, kind: &str) -> bool {
    if slug.is_empty() {
        warn!("Skipping {} record with empty slug", kind);
        return false;
    }
    true
}
