/// Maps thumbnail URLs to their highest-resolution variant.
///
/// Board sites encode the rendition size as a path segment
/// (`/236x/`, `/564x/`, ...); swapping it for the full-size segment is a
/// pure string rewrite. URLs that don't match any known token pass
/// through unchanged, so resolution never fails.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    low_res_tokens: Vec<String>,
    high_res_token: String,
}

impl UrlResolver {
    pub fn new(low_res_tokens: Vec<String>, high_res_token: String) -> Self {
        Self {
            low_res_tokens,
            high_res_token,
        }
    }

    /// Rewrite `raw_url` to its high-resolution variant, or return it
    /// unchanged when no known low-res token is present.
    pub fn resolve_high_res(&self, raw_url: &str) -> String {
        for token in &self.low_res_tokens {
            if raw_url.contains(token.as_str()) {
                return raw_url.replace(token.as_str(), &self.high_res_token);
            }
        }
        raw_url.to_string()
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(
            vec!["/236x/".to_string(), "/564x/".to_string()],
            "/736x/".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rewrites_small_rendition() {
        let resolver = UrlResolver::default();
        let resolved = resolver.resolve_high_res("https://i.pinimg.com/236x/aa/bb/cc.jpg");
        assert_eq!(resolved, "https://i.pinimg.com/736x/aa/bb/cc.jpg");
    }

    #[test]
    fn test_resolve_rewrites_medium_rendition() {
        let resolver = UrlResolver::default();
        let resolved = resolver.resolve_high_res("https://i.pinimg.com/564x/aa/bb/cc.jpg");
        assert_eq!(resolved, "https://i.pinimg.com/736x/aa/bb/cc.jpg");
    }

    #[test]
    fn test_resolve_no_token_is_identity() {
        let resolver = UrlResolver::default();
        let url = "https://i.pinimg.com/originals/aa/bb/cc.jpg";
        assert_eq!(resolver.resolve_high_res(url), url);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = UrlResolver::default();
        let once = resolver.resolve_high_res("https://i.pinimg.com/236x/aa/bb/cc.jpg");
        let twice = resolver.resolve_high_res(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_custom_tokens() {
        let resolver = UrlResolver::new(vec!["/small/".to_string()], "/large/".to_string());
        assert_eq!(
            resolver.resolve_high_res("https://img.example.com/small/x.jpg"),
            "https://img.example.com/large/x.jpg"
        );
    }
}
