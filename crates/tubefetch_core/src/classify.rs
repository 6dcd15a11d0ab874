/// Display class of one server log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Downloader chatter such as `[youtube] ...`.
    Muted,
    /// Progress hook output (`Progression: ...`).
    Progress,
    /// Lines reporting an `erreur`.
    Error,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let style = classify_line(&text);
        Self { text, style }
    }

    /// Physical lines of this entry. Newlines embedded in one server line
    /// break it the same way as the separator between entries, and every
    /// piece keeps the entry's style.
    pub fn display_lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// First matching rule wins: the `[` prefix is checked before either substring.
pub fn classify_line(line: &str) -> LineStyle {
    if line.starts_with('[') {
        LineStyle::Muted
    } else if line.contains("Progression:") {
        LineStyle::Progress
    } else if line.contains("erreur") {
        LineStyle::Error
    } else {
        LineStyle::Plain
    }
}
