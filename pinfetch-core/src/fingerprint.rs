use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest; enough to dedup within a
/// single board while keeping filenames short.
const FINGERPRINT_LEN: usize = 8;

/// Compute the content fingerprint for a resolved image URL.
///
/// SHA-256 of the URL string, lowercase hex, truncated to 8 characters.
/// Deterministic and stable across runs.
pub fn fingerprint(resolved_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(resolved_url.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)[..FINGERPRINT_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let url = "https://i.pinimg.com/736x/aa/bb/cc.jpg";
        assert_eq!(fingerprint(url), fingerprint(url));
    }

    #[test]
    fn fingerprint_is_eight_hex_chars() {
        let fp = fingerprint("https://i.pinimg.com/736x/aa/bb/cc.jpg");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_differs_per_url() {
        assert_ne!(
            fingerprint("https://i.pinimg.com/736x/aa.jpg"),
            fingerprint("https://i.pinimg.com/736x/bb.jpg")
        );
    }
}
