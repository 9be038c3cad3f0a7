use crate::error::{Result, ScrapeError};
use crate::renderer::PageRenderer;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// Drives a [`PageRenderer`] through scroll-and-wait cycles until the page
/// stops yielding new image URLs.
///
/// Stability is declared when the accumulated URL count is unchanged for
/// `stable_rounds` consecutive scrolls; `max_scrolls` bounds runtime on
/// pages that load content forever.
pub struct ContentLoader {
    max_scrolls: usize,
    stable_rounds: usize,
    settle_delay: Duration,
}

impl ContentLoader {
    pub fn new() -> Self {
        Self {
            max_scrolls: 30,
            stable_rounds: 2,
            settle_delay: Duration::from_secs(2),
        }
    }

    pub fn with_max_scrolls(mut self, max_scrolls: usize) -> Self {
        self.max_scrolls = max_scrolls;
        self
    }

    pub fn with_stable_rounds(mut self, stable_rounds: usize) -> Self {
        self.stable_rounds = stable_rounds.max(1);
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Navigate to `board_url` and scroll until the discovered image URL
    /// set stops growing. Returns the URLs in first-discovery order.
    ///
    /// Returns [`ScrapeError::AuthenticationRequired`] if the page shows a
    /// login wall; the caller owns the interactive pause and re-invocation.
    pub async fn load_all_image_urls<R: PageRenderer>(
        &self,
        renderer: &R,
        board_url: &str,
    ) -> Result<Vec<String>> {
        renderer.navigate(board_url).await?;

        if !renderer.is_authenticated().await? {
            return Err(ScrapeError::AuthenticationRequired);
        }

        let mut discovered = Vec::new();
        let mut seen = HashSet::new();
        absorb(renderer.query_image_urls().await?, &mut discovered, &mut seen);

        let mut unchanged = 0;
        for scroll in 1..=self.max_scrolls {
            let before = discovered.len();

            renderer.scroll_to_bottom().await?;
            tokio::time::sleep(self.settle_delay).await;
            absorb(renderer.query_image_urls().await?, &mut discovered, &mut seen);

            if discovered.len() == before {
                unchanged += 1;
                if unchanged >= self.stable_rounds {
                    info!("Content stabilized after {} scrolls", scroll);
                    break;
                }
            } else {
                unchanged = 0;
            }

            debug!(
                "Scroll {}/{}: {} URLs discovered",
                scroll,
                self.max_scrolls,
                discovered.len()
            );
        }

        info!("Discovered {} image URLs", discovered.len());
        Ok(discovered)
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn absorb(urls: Vec<String>, discovered: &mut Vec<String>, seen: &mut HashSet<String>) {
    for url in urls {
        if seen.insert(url.clone()) {
            discovered.push(url);
        }
    }
}
