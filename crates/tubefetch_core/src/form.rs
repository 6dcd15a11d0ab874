use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Name of the form field holding the media URL.
pub const URL_FIELD: &str = "url";

/// Result view the client moves to once the server answers.
const RESULT_PATH: &str = "/result";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Field data of one submission: the URL plus download options the client
/// forwards to the server without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadForm {
    pub url: String,
    pub options: Vec<(String, String)>,
}

impl DownloadForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Fields in submission order, URL first.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        std::iter::once((URL_FIELD, self.url.as_str()))
            .chain(
                self.options
                    .iter()
                    .filter(|(name, _)| name != URL_FIELD)
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .collect()
    }
}

/// Body returned by the download endpoint once the job is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub success: bool,
    pub message: String,
}

/// `/result?success=<bool>&message=<encoded>` for the given outcome.
pub fn result_location(outcome: &DownloadOutcome) -> String {
    format!(
        "{RESULT_PATH}?success={}&message={}",
        outcome.success,
        utf8_percent_encode(&outcome.message, URI_COMPONENT)
    )
}
