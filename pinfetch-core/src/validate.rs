use crate::error::{DownloadError, Result};

/// Reject board URLs outside the configured allow-list.
///
/// Runs before any browser interaction so a typo never spins up a
/// WebDriver session.
pub fn validate_board_url(board_url: &str, allowed_prefixes: &[String]) -> Result<()> {
    if allowed_prefixes
        .iter()
        .any(|prefix| board_url.starts_with(prefix.as_str()))
    {
        return Ok(());
    }

    Err(DownloadError::InvalidUrl(format!(
        "{} does not match any allowed board prefix ({})",
        board_url,
        allowed_prefixes.join(", ")
    )))
}
