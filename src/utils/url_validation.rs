use url::{Host, Url};
use validator::ValidateLength;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];
const MAX_URL_LENGTH: u64 = 2083;
const MAX_LABEL_LENGTH: usize = 63;

/// Checks that `raw` is an absolute URL with an explicit protocol and a
/// fully qualified host, e.g. `https://example.com/path`.
///
/// Bare domains (`example.com`), single-label hosts (`http://localhost`),
/// non-network schemes (`mailto:`, `javascript:`), whitespace or angle
/// brackets anywhere, and URLs over 2083 characters are rejected.
pub fn is_shortenable(raw: &str) -> bool {
    if raw.is_empty() || !raw.validate_length(None, Some(MAX_URL_LENGTH), None) {
        return false;
    }

    // The parser would percent-encode these silently.
    if raw.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
        return false;
    }

    // The parser fills in `//` for special schemes, so require it literally.
    let Some((_, after_scheme)) = raw.split_once(':') else {
        return false;
    };
    if !after_scheme.starts_with("//") {
        return false;
    }

    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => is_qualified_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn is_qualified_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// A DNS label: 1 to 63 characters of letters, digits and inner hyphens.
/// An empty label (from `a..b` or a trailing dot) is invalid.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
