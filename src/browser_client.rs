use crate::config::WaitStrategy;
use crate::error::{Result, ScrapeError};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the headless browser session
#[derive(Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Navigation timeout
    pub timeout: Duration,
    pub disable_images: bool,
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            timeout: Duration::from_secs(90),
            disable_images: true, // Faster loading; src attributes stay intact
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

/// Upper bound on scroll passes when waiting for lazy-loaded content
const MAX_SCROLL_PASSES: usize = 20;

/// Owns the Chrome process for the duration of one run.
///
/// Teardown is RAII: dropping the client kills the Chrome child, so the
/// process is released on every exit path including errors.
pub struct BrowserClient {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserClient {
    /// Launch headless Chrome with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(BrowserConfig::default())
    }

    /// Launch headless Chrome with custom configuration
    pub fn with_config(config: BrowserConfig) -> Result<Self> {
        use std::ffi::OsStr;

        // Owned strings first so the OsStr args can borrow from them
        let images_arg = config
            .disable_images
            .then(|| "--blink-settings=imagesEnabled=false".to_string());
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-setuid-sandbox"),
        ];
        if let Some(ref img) = images_arg {
            args.push(OsStr::new(img));
        }
        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .args(args)
            .build()
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        Ok(Self { browser, config })
    }

    fn create_tab(&self) -> Result<Arc<Tab>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        tab.set_default_timeout(self.config.timeout);

        // Injected on every new document, so the automation fingerprint
        // stays hidden after navigation too
        tab.enable_stealth_mode()
            .map_err(|e| ScrapeError::Page(e.to_string()))?;

        Ok(tab)
    }

    /// Navigate to a URL and wait for the page to load
    pub fn navigate(&self, url: &str) -> Result<Arc<Tab>> {
        log::info!("Navigating to: {}", url);

        let tab = self.create_tab()?;

        tab.navigate_to(url)
            .map_err(|e| ScrapeError::Navigation(format!("{}: {}", url, e)))?
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Timeout(format!("navigation to {}: {}", url, e)))?;

        tab.wait_for_element_with_custom_timeout("body", self.config.timeout)
            .map_err(|e| ScrapeError::Timeout(format!("page body of {}: {}", url, e)))?;

        Ok(tab)
    }

    /// Navigate to a collection page, wait for a product container to render,
    /// let lazy-loaded content settle per the wait strategy, and return the
    /// rendered HTML.
    pub fn collection_html(
        &self,
        url: &str,
        container_selectors: &[&str],
        wait: WaitStrategy,
        selector_timeout: Duration,
        scroll_pause: Duration,
    ) -> Result<String> {
        let tab = self.navigate(url)?;

        let matched = self.wait_for_any(&tab, container_selectors, selector_timeout)?;
        log::info!("Found product elements via selector: {}", matched);

        if wait == WaitStrategy::FullScroll {
            log::info!("Scrolling to load all content...");
            self.scroll_until_settled(&tab, scroll_pause)?;
        }

        tab.get_content()
            .map_err(|e| ScrapeError::Page(format!("reading page content: {}", e)))
    }

    /// Try each candidate selector in order, returning the first that appears
    fn wait_for_any<'a>(
        &self,
        tab: &Arc<Tab>,
        selectors: &[&'a str],
        timeout: Duration,
    ) -> Result<&'a str> {
        for &selector in selectors {
            log::debug!("Waiting for selector: {}", selector);
            if tab
                .wait_for_element_with_custom_timeout(selector, timeout)
                .is_ok()
            {
                return Ok(selector);
            }
        }
        Err(ScrapeError::NoProducts)
    }

    /// Scroll to the bottom repeatedly until the page height stops growing,
    /// so lazy-loaded product tiles are rendered before extraction.
    fn scroll_until_settled(&self, tab: &Arc<Tab>, pause: Duration) -> Result<()> {
        let mut last_height = self.page_height(tab)?;

        for _ in 0..MAX_SCROLL_PASSES {
            tab.evaluate("window.scrollTo(0, document.body.scrollHeight);", false)
                .map_err(|e| ScrapeError::Page(format!("scroll failed: {}", e)))?;
            std::thread::sleep(pause);

            let height = self.page_height(tab)?;
            if height == last_height {
                break;
            }
            last_height = height;
        }

        Ok(())
    }

    fn page_height(&self, tab: &Arc<Tab>) -> Result<u64> {
        let result = tab
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| ScrapeError::Page(format!("reading page height: {}", e)))?;
        Ok(result.value.and_then(|v| v.as_u64()).unwrap_or(0))
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl Drop for BrowserClient {
    fn drop(&mut self) {
        // Chrome process teardown happens when the Browser handle drops
        log::debug!("Browser client dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_default() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert!(config.disable_images);
        assert!(config.user_agent.is_some());
    }

    #[test]
    #[ignore] // Requires Chrome/Chromium
    fn test_browser_creation() {
        let client = BrowserClient::new();
        assert!(client.is_ok());
    }
}
