use std::io;

use console::{style, Term};
use tubefetch_core::{LineStyle, UrlValidity};

use super::constants::*;
use super::render::{Severity, ViewCommand};

/// Writes render commands to stdout.
pub struct Terminal {
    term: Term,
}

impl Terminal {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    pub fn execute(&self, cmds: Vec<ViewCommand>) -> io::Result<()> {
        for cmd in &cmds {
            if let Some(text) = format_command(cmd) {
                self.term.write_line(&text)?;
            }
        }
        self.term.flush()
    }

    pub fn prompt_url(&self) -> io::Result<String> {
        self.term.write_str(URL_PROMPT)?;
        self.term.flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no URL entered",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn show_navigation(&self, target: &str) -> io::Result<()> {
        self.term.write_line(&format!(
            "{} {}",
            style(format!("{RESULT_LABEL}:")).cyan().bold(),
            style(target).underlined()
        ))
    }
}

fn format_command(cmd: &ViewCommand) -> Option<String> {
    match cmd {
        ViewCommand::SetValidity(UrlValidity::Neutral) => None,
        ViewCommand::SetValidity(UrlValidity::Valid) => {
            Some(format!("{}", style(format!("✔ {VALID_HINT}")).green()))
        }
        ViewCommand::SetValidity(UrlValidity::Invalid) => {
            Some(format!("{}", style(format!("✘ {INVALID_HINT}")).red()))
        }
        ViewCommand::SetSubmitEnabled(false) => {
            Some(format!("{}", style(SUBMITTING_HINT).dim()))
        }
        ViewCommand::SetSubmitEnabled(true) => None,
        ViewCommand::ClearOutput => Some(format!("{}", style("──").dim())),
        ViewCommand::AppendLine { text, style: line_style } => {
            Some(format_line(text, *line_style))
        }
        // The terminal follows its own output; flushing is enough.
        ViewCommand::ScrollToBottom => None,
        ViewCommand::ShowStatus { text, severity } => {
            let label = match severity {
                Severity::Success => style("OK").green().bold(),
                Severity::Warning => style("STOP").yellow().bold(),
                Severity::Error => style("ERR").red().bold(),
            };
            Some(format!("{label} {text}"))
        }
    }
}

fn format_line(text: &str, line_style: LineStyle) -> String {
    let styled = match line_style {
        LineStyle::Muted => style(text).dim(),
        LineStyle::Progress => style(text).blue(),
        LineStyle::Error => style(text).red(),
        LineStyle::Plain => style(text),
    };
    styled.to_string()
}

#[cfg(test)]
mod tests {
    use console::strip_ansi_codes;

    use super::*;

    fn plain(cmd: ViewCommand) -> Option<String> {
        format_command(&cmd).map(|text| strip_ansi_codes(&text).into_owned())
    }

    #[test]
    fn validity_hints_match_form_feedback() {
        assert_eq!(
            plain(ViewCommand::SetValidity(UrlValidity::Valid)).as_deref(),
            Some("✔ URL valide")
        );
        assert_eq!(
            plain(ViewCommand::SetValidity(UrlValidity::Invalid)).as_deref(),
            Some("✘ L'URL doit commencer par \"https://\"")
        );
        assert_eq!(plain(ViewCommand::SetValidity(UrlValidity::Neutral)), None);
    }

    #[test]
    fn log_lines_keep_their_text() {
        for line_style in [
            LineStyle::Muted,
            LineStyle::Progress,
            LineStyle::Error,
            LineStyle::Plain,
        ] {
            let text = plain(ViewCommand::AppendLine {
                text: "Progression: 50%".into(),
                style: line_style,
            });
            assert_eq!(text.as_deref(), Some("Progression: 50%"));
        }
        assert_eq!(plain(ViewCommand::ScrollToBottom), None);
    }

    #[test]
    fn status_is_labelled_by_severity() {
        assert_eq!(
            plain(ViewCommand::ShowStatus {
                text: "Done".into(),
                severity: Severity::Success,
            })
            .as_deref(),
            Some("OK Done")
        );
        assert_eq!(
            plain(ViewCommand::ShowStatus {
                text: "network error: connection refused".into(),
                severity: Severity::Error,
            })
            .as_deref(),
            Some("ERR network error: connection refused")
        );
    }
}
