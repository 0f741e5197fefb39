//! Sitemap XML serialization.
//!
//! Renders entries into the standard sitemap protocol shape:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://games.example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;

use chrono::SecondsFormat;

use crate::sitemap::SitemapEntry;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render entries into a sitemap XML document. An empty slice yields a
/// valid, empty urlset.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.url));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(
            &entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(entry.change_frequency.as_str());
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(&format!("{:.1}", entry.priority));
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::sitemap::ChangeFrequency;

    fn entry(url: &str) -> SitemapEntry {
        SitemapEntry {
            url: url.to_string(),
            last_modified: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_render_empty() {
        let xml = render(&[]);

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_render_single_entry() {
        let xml = render(&[entry("https://games.example.com")]);

        assert!(xml.contains("<loc>https://games.example.com</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn test_render_multiple_entries() {
        let xml = render(&[
            entry("https://games.example.com"),
            entry("https://games.example.com/fr"),
            entry("https://games.example.com/about"),
        ]);

        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("</url>").count(), 3);
        assert!(xml.contains("<loc>https://games.example.com/fr</loc>"));
    }

    #[test]
    fn test_render_escapes_url() {
        let xml = render(&[entry("https://games.example.com/search?q=a&b=c")]);
        assert!(xml.contains("<loc>https://games.example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_render_priority_formatting() {
        let mut e = entry("https://games.example.com/about");
        e.priority = 0.5;
        let xml = render(&[e]);
        assert!(xml.contains("<priority>0.5</priority>"));
    }

    #[test]
    fn test_render_structure() {
        let xml = render(&[entry("https://games.example.com")]);
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
    }
}
