use crate::error::Result;

/// The capabilities the discovery loop needs from a rendered page.
///
/// The loader only ever drives a renderer through these four calls, so
/// anything that can navigate, scroll, report the image URLs currently in
/// the DOM, and say whether a user session is active can stand in for a
/// real browser (tests use an in-memory fake).
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    /// Load the given URL and wait for the initial render.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Scroll the viewport to the bottom of the document.
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Return the image URLs currently present in the DOM.
    ///
    /// Order is whatever the DOM yields; callers own deduplication.
    async fn query_image_urls(&self) -> Result<Vec<String>>;

    /// Whether the current page shows an authenticated user session.
    async fn is_authenticated(&self) -> Result<bool>;
}
