//! Article identity: link canonicalization and content hashing

use sha2::{Digest, Sha256};
use url::Url;

/// Redirect endpoints (host, path) that wrap outbound article links.
/// Hosts also match their subdomains.
const REDIRECTS: &[(&str, &str)] = &[
    ("google.com", "/url"),
    ("bing.com", "/news/apiclick.aspx"),
];

/// Query parameters that carry the embedded target URL
const TARGET_PARAMS: &[&str] = &["url", "u", "q"];

/// Resolve an aggregator redirect link to the article it points at.
///
/// Links that are not redirects, or that fail to parse, are returned unchanged.
pub fn canonicalize(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    if !is_redirect(parsed.host_str().unwrap_or_default(), parsed.path()) {
        return raw.to_string();
    }

    // query_pairs() percent-decodes values
    for (key, value) in parsed.query_pairs() {
        if !TARGET_PARAMS.contains(&key.as_ref()) {
            continue;
        }
        if let Ok(target) = Url::parse(&value) {
            if matches!(target.scheme(), "http" | "https") {
                return target.to_string();
            }
        }
    }

    raw.to_string()
}

fn is_redirect(host: &str, path: &str) -> bool {
    let host = host.to_ascii_lowercase();
    REDIRECTS.iter().any(|(h, p)| {
        (host == *h || host.ends_with(&format!(".{}", h))) && path.eq_ignore_ascii_case(p)
    })
}

/// Stable identifier for a canonical URL (hex SHA-256)
pub fn content_hash(canonical_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signature of an alert: hash over its ordered leading URLs
pub fn signature_hash<S: AsRef<str>>(urls: &[S]) -> String {
    let mut hasher = Sha256::new();
    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(url.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Lowercase host without a leading `www.`; empty when the URL does not parse
pub fn domain_of(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .unwrap_or_default();

    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_google_redirect() {
        let raw = "https://www.google.com/url?rct=j&sa=t&url=https%3A%2F%2Fwww.reuters.com%2Fmarkets%2Fnvda%3Fid%3D7&ct=ga";
        assert_eq!(
            canonicalize(raw),
            "https://www.reuters.com/markets/nvda?id=7"
        );
    }

    #[test]
    fn test_canonicalize_passthrough() {
        let raw = "https://www.cnbc.com/2025/01/01/nvidia-earnings.html?utm_source=x";
        assert_eq!(canonicalize(raw), raw);

        // Aggregator link without an embedded target stays as-is
        let opaque = "https://news.google.com/rss/articles/CBMiK2h0dHBz?oc=5";
        assert_eq!(canonicalize(opaque), opaque);
    }

    #[test]
    fn test_canonicalize_other_redirects() {
        let bing = "https://www.bing.com/news/apiclick.aspx?ref=FexRss&url=https%3A%2F%2Fapnews.com%2Farticle%2F1";
        assert_eq!(canonicalize(bing), "https://apnews.com/article/1");

        let news = "https://news.google.com/url?url=https://www.wsj.com/x";
        assert_eq!(canonicalize(news), "https://www.wsj.com/x");
    }

    #[test]
    fn test_canonicalize_only_redirect_paths() {
        // Search pages carry URLs in their query but are not redirects
        let search = "https://www.google.com/search?q=https://example.com/x";
        assert_eq!(canonicalize(search), search);

        let bing = "https://www.bing.com/search?q=https%3A%2F%2Fexample.com%2Fx";
        assert_eq!(canonicalize(bing), bing);

        let lookalike = "https://notgoogle.com/url?url=https://example.com/x";
        assert_eq!(canonicalize(lookalike), lookalike);
    }

    #[test]
    fn test_canonicalize_ignores_non_http_target() {
        let raw = "https://www.google.com/url?q=javascript%3Aalert(1)";
        assert_eq!(canonicalize(raw), raw);
    }

    #[test]
    fn test_canonicalize_malformed() {
        assert_eq!(canonicalize("not a url"), "not a url");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_content_hash_deterministic() {
        let a = content_hash("https://example.com/a");
        assert_eq!(a, content_hash("https://example.com/a"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, content_hash("https://example.com/b"));
    }

    #[test]
    fn test_signature_is_order_sensitive() {
        let ab = signature_hash(&["https://a.com/1", "https://b.com/2"]);
        let ba = signature_hash(&["https://b.com/2", "https://a.com/1"]);
        assert_ne!(ab, ba);
        assert_eq!(ab, signature_hash(&["https://a.com/1", "https://b.com/2"]));
        // Joining must not collapse element boundaries
        assert_ne!(
            signature_hash(&["https://a.com/1https://b.com/2"]),
            ab
        );
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("https://www.Reuters.com/markets"), "reuters.com");
        assert_eq!(domain_of("https://finance.yahoo.com/news/x"), "finance.yahoo.com");
        assert_eq!(domain_of("garbage"), "");
    }
}
