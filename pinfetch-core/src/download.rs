use crate::config::RunConfig;
use crate::error::{DownloadError, Result};
use crate::fingerprint::fingerprint;
use crate::model::{DiscoveredImage, DownloadRecord, DownloadSummary};
use reqwest::Client;
use reqwest::header::REFERER;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub type DownloadProgressCallback = Arc<dyn Fn(usize, usize, String) + Send + Sync>;

/// Sequential, dedup-aware image downloader.
///
/// Owns the seen-fingerprint set and the sequence counter for one run;
/// both die with the process. Per-item failures are logged and counted,
/// never propagated, so a broken image can't sink the batch.
pub struct Downloader {
    client: Client,
    seen: HashSet<String>,
    next_sequence: u32,
    file_prefix: String,
    referer: String,
    request_delay: Duration,
    progress_callback: Option<DownloadProgressCallback>,
}

impl Downloader {
    pub fn new(config: &RunConfig) -> Self {
        let client = Client::builder()
            .user_agent(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            seen: HashSet::new(),
            next_sequence: 1,
            file_prefix: config.file_prefix.clone(),
            referer: config.referer.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: DownloadProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Download every image in order, skipping duplicate fingerprints.
    ///
    /// Files land flat in `output_dir` as `{prefix}_{seq:04}_{hash8}.jpg`
    /// with sequence numbers gapless over successes. Only output-directory
    /// creation can fail the whole batch.
    pub async fn download_all(
        &mut self,
        images: &[DiscoveredImage],
        output_dir: &Path,
    ) -> Result<DownloadSummary> {
        tokio::fs::create_dir_all(output_dir).await?;

        info!("Downloading {} images to {}", images.len(), output_dir.display());

        let started = Instant::now();
        let mut summary = DownloadSummary::new(images.len());

        for (idx, image) in images.iter().enumerate() {
            // Rate bound between requests, not before the first one.
            if idx > 0 {
                tokio::time::sleep(self.request_delay).await;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(idx + 1, images.len(), image.resolved_url.clone());
            }

            let fp = fingerprint(&image.resolved_url);
            if self.seen.contains(&fp) {
                debug!("Skipping duplicate fingerprint {} ({})", fp, image.resolved_url);
                summary.duplicates += 1;
                continue;
            }

            let filename = format!("{}_{:04}_{}.jpg", self.file_prefix, self.next_sequence, fp);
            let path = output_dir.join(&filename);

            if path.exists() {
                info!("Already exists: {}", filename);
                self.record_success(fp, path, &mut summary);
                continue;
            }

            match self.fetch_image(&image.resolved_url).await {
                Ok(bytes) => match tokio::fs::write(&path, &bytes).await {
                    Ok(()) => {
                        info!("Downloaded {} ({} KB)", filename, bytes.len() / 1024);
                        self.record_success(fp, path, &mut summary);
                    }
                    Err(e) => {
                        warn!("Failed to write {}: {}", path.display(), e);
                        summary.failed += 1;
                    }
                },
                Err(e) => {
                    warn!("Failed to download {}: {}", image.resolved_url, e);
                    summary.failed += 1;
                }
            }
        }

        summary.elapsed = started.elapsed();
        info!(
            "Batch complete: {} downloaded, {} duplicates, {} failed",
            summary.downloaded, summary.duplicates, summary.failed
        );
        Ok(summary)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(REFERER, &self.referer)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        if !looks_like_image(&bytes) {
            return Err(DownloadError::NotAnImage(url.to_string()));
        }
        Ok(bytes.to_vec())
    }

    fn record_success(&mut self, fp: String, path: std::path::PathBuf, summary: &mut DownloadSummary) {
        summary.records.push(DownloadRecord {
            sequence: self.next_sequence,
            fingerprint: fp.clone(),
            local_path: path,
        });
        self.seen.insert(fp);
        self.next_sequence += 1;
        summary.downloaded += 1;
    }
}

/// Cheap signature sniff to reject HTML error pages and other non-image
/// payloads before they hit the disk.
fn looks_like_image(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8, 0xFF]) // JPEG
        || bytes.starts_with(&[0x89, b'P', b'N', b'G']) // PNG
        || bytes.starts_with(b"GIF8")
        || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_signature_accepted() {
        assert!(looks_like_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]));
    }

    #[test]
    fn test_png_signature_accepted() {
        assert!(looks_like_image(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]));
    }

    #[test]
    fn test_webp_signature_accepted() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBP");
        assert!(looks_like_image(&bytes));
    }

    #[test]
    fn test_html_payload_rejected() {
        assert!(!looks_like_image(b"<html><body>login required</body></html>"));
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(!looks_like_image(b""));
    }
}
