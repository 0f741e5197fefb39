use std::io::{Error, ErrorKind, Result as AppStateResult};
use std::sync::Arc;

use actix::{Actor, Addr};
use actix_web::web::Data;
use actix_web::{HttpResponse, Result};
use actix_web_prometheus::{PrometheusMetrics, PrometheusMetricsBuilder};

use gamesite::actors::catalog::CatalogActor;
use gamesite::actors::HealthCommand;
use gamesite::i18n::{STATIC_PAGES, SUPPORTED_LOCALES};
use gamesite::sitemap::SitemapConfig;

pub mod catalog;
pub mod sitemap;

pub struct AppState {
    // @NOTE: shared components
    pub(crate) catalog: Arc<Addr<CatalogActor>>,
    pub(crate) sitemap: SitemapConfig,

    // @NOTE: monitoring
    prometheus: PrometheusMetrics,
}

impl AppState {
    pub fn new() -> AppStateResult<AppState> {
        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "https://eggycar.coolgame.us".to_string());
        let catalog_url = std::env::var("CATALOG_API_URL")
            .unwrap_or_else(|_| format!("{}/api", site_url.trim_end_matches('/')));
        let catalog_timeout = std::env::var("CATALOG_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "Invalid CATALOG_TIMEOUT"))?;

        let prometheus = PrometheusMetricsBuilder::new("api")
            .endpoint("/metrics")
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Other,
                    format!("Failed to build prometheus metrics: {:?}", e),
                )
            })?;

        let catalog = Arc::new(CatalogActor::new(&catalog_url, catalog_timeout).start());

        Ok(AppState {
            catalog,
            sitemap: SitemapConfig::new(&site_url, SUPPORTED_LOCALES, STATIC_PAGES),
            prometheus,
        })
    }

    pub fn prometheus(&self) -> &PrometheusMetrics {
        &self.prometheus
    }
}

pub async fn health(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    match appstate.catalog.send(HealthCommand).await {
        Ok(true) => Ok(HttpResponse::Ok().body("ok")),
        Ok(false) => Ok(HttpResponse::GatewayTimeout().body("catalog is not ready")),
        Err(_) => Ok(HttpResponse::InternalServerError().body("catalog is unreachable")),
    }
}
