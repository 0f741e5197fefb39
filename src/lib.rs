pub mod actors;
pub mod i18n;
pub mod schemas;
pub mod sitemap;
