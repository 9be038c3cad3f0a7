use crate::error::{Result, ScrapeError};
use crate::renderer::PageRenderer;
use scraper::{Html, Selector};
use std::time::Duration;
use thirtyfour::{By, DesiredCapabilities, WebDriver};
use tracing::{debug, info, warn};

/// CSS selectors that indicate an authenticated session on the board site.
const LOGGED_IN_MARKERS: &[&str] = &[
    "[data-test-id='header-profile']",
    "a[href*='/settings/']",
    "button[aria-label*='Profile']",
];

/// CSS selectors that indicate the login wall is showing instead.
const LOGIN_WALL_MARKERS: &[&str] = &["input[type='email']", "div[data-test-id='login-modal']"];

/// A [`PageRenderer`] backed by a real browser over the WebDriver protocol.
///
/// The browser is expected to carry the user's existing session (profile,
/// cookies); this type never performs a login itself.
pub struct WebDriverRenderer {
    driver: WebDriver,
    image_host: String,
    settle_delay: Duration,
}

impl WebDriverRenderer {
    /// Connects to a running chromedriver/geckodriver at `endpoint`.
    ///
    /// `image_host` is the substring an `img` URL must contain to count as
    /// board content (e.g. the board site's CDN host).
    pub async fn connect(endpoint: &str, image_host: &str) -> Result<Self> {
        info!("Connecting to WebDriver at {}", endpoint);
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(endpoint, caps)
            .await
            .map_err(|e| ScrapeError::RendererUnavailable(format!("{} ({})", endpoint, e)))?;

        Ok(Self {
            driver,
            image_host: image_host.to_string(),
            settle_delay: Duration::from_secs(2),
        })
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Closes the browser session.
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }

    async fn any_marker_present(&self, selectors: &[&str]) -> bool {
        for selector in selectors {
            match self.driver.find_all(By::Css(*selector)).await {
                Ok(elements) if !elements.is_empty() => return true,
                Ok(_) => {}
                Err(e) => debug!("Marker probe {} failed: {}", selector, e),
            }
        }
        false
    }
}

impl PageRenderer for WebDriverRenderer {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.driver.goto(url).await?;
        tokio::time::sleep(self.settle_delay).await;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }

    async fn query_image_urls(&self) -> Result<Vec<String>> {
        let html = self.driver.source().await?;
        Ok(extract_image_urls(&html, &self.image_host))
    }

    async fn is_authenticated(&self) -> Result<bool> {
        if self.any_marker_present(LOGGED_IN_MARKERS).await {
            return Ok(true);
        }
        if self.any_marker_present(LOGIN_WALL_MARKERS).await {
            return Ok(false);
        }
        // Neither marker set matched; assume the session is usable rather
        // than blocking on a login that may not be needed.
        warn!("Could not determine login status, continuing");
        Ok(true)
    }
}

/// Pull image URLs matching `image_host` out of a rendered page.
///
/// Reads both `src` and lazy-load `data-src` attributes.
pub fn extract_image_urls(html: &str, image_host: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("img").unwrap();

    let mut urls = Vec::new();
    for element in document.select(&img_selector) {
        for attr in ["src", "data-src"] {
            if let Some(value) = element.value().attr(attr)
                && value.contains(image_host)
            {
                urls.push(value.to_string());
            }
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filters_by_image_host() {
        let html = r#"<html><body>
            <img src="https://i.pinimg.com/236x/aa/bb/cc.jpg">
            <img src="https://cdn.other.com/logo.png">
        </body></html>"#;

        let urls = extract_image_urls(html, "pinimg.com");
        assert_eq!(urls, vec!["https://i.pinimg.com/236x/aa/bb/cc.jpg"]);
    }

    #[test]
    fn test_extract_reads_lazy_load_attribute() {
        let html = r#"<html><body>
            <img data-src="https://i.pinimg.com/564x/dd/ee/ff.jpg">
        </body></html>"#;

        let urls = extract_image_urls(html, "pinimg.com");
        assert_eq!(urls, vec!["https://i.pinimg.com/564x/dd/ee/ff.jpg"]);
    }

    #[test]
    fn test_extract_empty_page() {
        let urls = extract_image_urls("<html><body></body></html>", "pinimg.com");
        assert!(urls.is_empty());
    }
}
