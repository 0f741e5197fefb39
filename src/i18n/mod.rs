//! Locale configuration and locale-aware path resolution.
//!
//! The locale list is ordered; sitemap output and the routing layer both
//! iterate it in this order so generated URL sets stay stable across runs.

pub const DEFAULT_LOCALE: &str = "en";

pub const SUPPORTED_LOCALES: &[&str] = &[
    "en",    // English
    "zh-CN", // Simplified Chinese
    "es",    // Spanish
    "fr",    // French
    "bn",    // Bengali
    "ru",    // Russian
    "pt",    // Portuguese
    "pt-BR", // Brazilian Portuguese
    "id",    // Indonesian
    "de",    // German
    "ja",    // Japanese
    "tr",    // Turkish
    "vi",    // Vietnamese
    "th",    // Thai
    "ko",    // Korean
    "it",    // Italian
    "uk",    // Ukrainian
    "zh-TW", // Traditional Chinese
];

pub const STATIC_PAGES: &[&str] = &["about", "contact", "privacy"];

pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Resolve a routed path for the given locale.
///
/// The default locale is prefix-free, so `en` paths come back untouched.
/// Every other locale is prefixed as `/{locale}{path}`, with the root path
/// collapsing to `/{locale}`. Non-absolute paths are returned unchanged
/// since the router only ever hands us absolute ones.
pub fn path_with_locale(pathname: &str, locale: &str) -> String {
    if locale == DEFAULT_LOCALE {
        return pathname.to_string();
    }

    if pathname == "/" {
        return format!("/{}", locale);
    }

    if pathname.starts_with('/') {
        return format!("/{}{}", locale, pathname);
    }

    pathname.to_string()
}
