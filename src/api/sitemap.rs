use std::sync::Arc;

use actix::Addr;
use actix_web::web::Data;
use actix_web::{HttpResponse, Result};

use chrono::Utc;
use log::{debug, error};

use gamesite::actors::catalog::{CatalogActor, ListCategoriesCommand, ListGamesCommand};
use gamesite::sitemap::{generate, xml, SitemapConfig};

use crate::api::AppState;

/// GET /sitemap.xml: fetch both listings concurrently, expand the URL set
/// and serialize it.
pub async fn sitemap(appstate: Data<Arc<AppState>>) -> Result<HttpResponse> {
    Ok(render_sitemap(&appstate.catalog, &appstate.sitemap).await)
}

/// Fail-safe-empty policy: when either upstream listing cannot be fetched
/// the crawler gets a valid empty urlset instead of a partially-populated
/// one. Under-reporting is recoverable on the next crawl; advertising stale
/// or broken links is not. Games and categories are treated symmetrically
/// here.
async fn render_sitemap(catalog: &Addr<CatalogActor>, config: &SitemapConfig) -> HttpResponse {
    let listings = futures::try_join!(
        catalog.send(ListGamesCommand),
        catalog.send(ListCategoriesCommand),
    );

    let (games, categories) = match listings {
        Ok((Ok(games), Ok(categories))) => (games, categories),
        Ok((Err(error), _)) | Ok((_, Err(error))) => {
            error!("Fail to fetch catalog for sitemap: {}", error);

            return urlset(xml::render(&[]));
        }
        Err(error) => {
            error!("Fail to reach catalog actor: {}", error);

            return HttpResponse::InternalServerError()
                .body(format!("Failed to generate sitemap: {}", error));
        }
    };

    let entries = generate(config, &games, &categories, Utc::now());
    debug!(
        "Generated sitemap with {} entries from {} games and {} categories",
        entries.len(),
        games.len(),
        categories.len()
    );

    urlset(xml::render(&entries))
}

fn urlset(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("application/xml").body(body)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use actix::Actor;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    use super::*;

    /// Minimal catalog stub answering every request with a fixed status and
    /// body, including the retries the fetch client issues on 5xx.
    fn spawn_upstream(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(stream) => stream,
                    Err(_) => return,
                };
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = write!(
                    stream,
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
            }
        });

        format!("http://{}", addr)
    }

    fn config() -> SitemapConfig {
        SitemapConfig::new("https://games.example.com", &["en", "fr"], &["about"])
    }

    /// A failing game listing (HTTP 500 upstream) serves an empty urlset,
    /// never a partially-populated one.
    #[actix_rt::test]
    async fn test_failed_listing_serves_empty_urlset() {
        let upstream = spawn_upstream("500 Internal Server Error", "");
        let catalog = CatalogActor::new(&upstream, 2).start();

        let response = render_sitemap(&catalog, &config()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let xml = std::str::from_utf8(&body).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    /// Empty listings still produce the static skeleton of the site.
    #[actix_rt::test]
    async fn test_empty_listings_serve_static_skeleton() {
        let upstream = spawn_upstream("200 OK", "[]");
        let catalog = CatalogActor::new(&upstream, 2).start();

        let response = render_sitemap(&catalog, &config()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let xml = std::str::from_utf8(&body).unwrap();
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<loc>https://games.example.com</loc>"));
        assert!(xml.contains("<loc>https://games.example.com/fr</loc>"));
        assert!(xml.contains("<loc>https://games.example.com/fr/about</loc>"));
        assert!(!xml.contains("/games/"));
    }
}
