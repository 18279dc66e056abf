use shopmy_scraper::browser_client::{BrowserClient, BrowserConfig};
use shopmy_scraper::config::ScraperConfig;
use shopmy_scraper::error::{Result, ScrapeError};
use shopmy_scraper::{dedup, export, extract};
use std::path::Path;
use url::Url;

fn main() {
    init_logging();

    let config = ScraperConfig::load();
    log::info!("Starting the scraper...");
    log::info!("Collection URL: {}", config.collection_url);
    log::info!("Output path: {}", config.output_path);

    match run(&config) {
        Ok(count) => {
            log::info!("Saved {} unique products to {}", count, config.output_path);
        }
        Err(e) => {
            log::error!("Scrape failed: {}", e);
            eprintln!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// The whole pipeline, strictly sequential:
/// launch browser, navigate, extract, dedup, write.
///
/// The CSV is only written after extraction succeeds, so a failed run never
/// clobbers the output of an earlier one. The Chrome process is torn down
/// when `browser` drops, on success and error paths alike.
fn run(config: &ScraperConfig) -> Result<usize> {
    let base = Url::parse(&config.collection_url)
        .map_err(|e| ScrapeError::Config(format!("collection URL: {}", e)))?;

    let browser = BrowserClient::with_config(BrowserConfig {
        headless: config.headless,
        timeout: config.navigation_timeout(),
        ..BrowserConfig::default()
    })?;

    let html = browser.collection_html(
        &config.collection_url,
        extract::PRODUCT_CONTAINER_SELECTORS,
        config.wait_strategy,
        config.selector_timeout(),
        config.scroll_pause(),
    )?;

    log::info!("Extracting product information...");
    let candidates = extract::extract_products(&html, &base);
    let found = candidates.len();

    let unique = dedup::dedup_by_product_url(candidates);
    if found > unique.len() {
        log::info!("Removed {} duplicate products", found - unique.len());
    }

    export::write_csv(&unique, Path::new(&config.output_path))?;
    Ok(unique.len())
}

fn init_logging() {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }

    // No log4rs.yml next to the binary; fall back to console logging
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("console logging config is valid");
    let _ = log4rs::init_config(config);
}
