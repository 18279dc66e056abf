use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the target collection URL
pub const ENV_COLLECTION_URL: &str = "SHOPMY_COLLECTION_URL";
/// Environment variable overriding the output CSV path
pub const ENV_OUTPUT_PATH: &str = "SHOPMY_OUTPUT_PATH";

#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Target collection page
    #[serde(default = "default_collection_url")]
    pub collection_url: String,

    /// Destination CSV file; truncated and overwritten on success
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Page navigation timeout in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Per-selector wait timeout in seconds
    #[serde(default = "default_selector_timeout")]
    pub selector_timeout_secs: u64,

    /// Pause between scroll passes in milliseconds
    #[serde(default = "default_scroll_pause")]
    pub scroll_pause_ms: u64,

    /// How long to wait for lazy-loaded content
    #[serde(default)]
    pub wait_strategy: WaitStrategy,

    /// Disable for a visible browser window when debugging
    #[serde(default = "default_true")]
    pub headless: bool,
}

/// Trade-off between completeness of lazy-loaded content and run duration
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WaitStrategy {
    /// Wait for a product container to appear, then extract immediately
    Selector,
    /// Additionally scroll until the page height stops growing
    #[default]
    FullScroll,
}

fn default_collection_url() -> String {
    "https://shopmy.us/collections/727615".to_string()
}
fn default_output_path() -> String {
    "shopmy_products.csv".to_string()
}
fn default_navigation_timeout() -> u64 {
    90
}
fn default_selector_timeout() -> u64 {
    30
}
fn default_scroll_pause() -> u64 {
    2000
}
fn default_true() -> bool {
    true
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            collection_url: default_collection_url(),
            output_path: default_output_path(),
            navigation_timeout_secs: default_navigation_timeout(),
            selector_timeout_secs: default_selector_timeout(),
            scroll_pause_ms: default_scroll_pause(),
            wait_strategy: WaitStrategy::default(),
            headless: true,
        }
    }
}

impl ScraperConfig {
    /// Load configuration: `config.toml` if present, built-in defaults
    /// otherwise, with environment variables applied last.
    pub fn load() -> Self {
        let mut cfg = Self::from_file(Path::new("config.toml"));

        if let Ok(url) = env::var(ENV_COLLECTION_URL) {
            if !url.is_empty() {
                cfg.collection_url = url;
            }
        }
        if let Ok(path) = env::var(ENV_OUTPUT_PATH) {
            if !path.is_empty() {
                cfg.output_path = path;
            }
        }

        cfg
    }

    fn from_file(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<ScraperConfig>(&content) {
                    return cfg;
                }
                log::warn!("Ignoring malformed {}", path.display());
            }
        }
        Self::default()
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }
}
