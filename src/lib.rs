// Library interface for shopmy_scraper
// This allows tests and external crates to use the scraper components

pub mod browser_client;
pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod extract;
pub mod helpers;
pub mod models;
