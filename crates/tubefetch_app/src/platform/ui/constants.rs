pub const VALID_HINT: &str = "URL valide";
pub const INVALID_HINT: &str = "L'URL doit commencer par \"https://\"";
pub const URL_PROMPT: &str = "URL: ";
pub const SUBMITTING_HINT: &str = "Download started, press Ctrl-C to cancel";
pub const RESULT_LABEL: &str = "Result";
