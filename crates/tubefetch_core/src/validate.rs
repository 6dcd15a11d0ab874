/// Prefix a URL must carry to be accepted by the download form.
pub const REQUIRED_SCHEME: &str = "https://";

/// Visual state of the URL input. Exactly one applies at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlValidity {
    /// Empty input: neither valid nor invalid is shown.
    #[default]
    Neutral,
    Valid,
    Invalid,
}

/// Classifies the raw input. Matching is case sensitive and does not trim.
pub fn validate_url(url: &str) -> UrlValidity {
    if url.is_empty() {
        UrlValidity::Neutral
    } else if url.starts_with(REQUIRED_SCHEME) {
        UrlValidity::Valid
    } else {
        UrlValidity::Invalid
    }
}
