use tubefetch_core::{AppViewModel, LineStyle, Phase, UrlValidity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    SetValidity(UrlValidity),
    SetSubmitEnabled(bool),
    /// A new download replaced the buffer.
    ClearOutput,
    AppendLine { text: String, style: LineStyle },
    ScrollToBottom,
    ShowStatus { text: String, severity: Severity },
}

/// Turns view models into the commands needed to bring the terminal up to
/// date. The terminal only grows, so the renderer remembers what it already
/// showed and emits the difference.
#[derive(Debug, Default)]
pub struct Renderer {
    validity: Option<UrlValidity>,
    submit_enabled: Option<bool>,
    shown_lines: usize,
    status: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<ViewCommand> {
        let mut cmds = Vec::new();

        if self.validity != Some(view.validity) {
            self.validity = Some(view.validity);
            cmds.push(ViewCommand::SetValidity(view.validity));
        }

        if self.submit_enabled != Some(view.submit_enabled) {
            self.submit_enabled = Some(view.submit_enabled);
            cmds.push(ViewCommand::SetSubmitEnabled(view.submit_enabled));
        }

        if view.lines.len() < self.shown_lines {
            self.shown_lines = 0;
            cmds.push(ViewCommand::ClearOutput);
        }
        let fresh = &view.lines[self.shown_lines..];
        if !fresh.is_empty() {
            for line in fresh {
                for text in line.display_lines() {
                    cmds.push(ViewCommand::AppendLine {
                        text: text.to_string(),
                        style: line.style,
                    });
                }
            }
            self.shown_lines = view.lines.len();
            cmds.push(ViewCommand::ScrollToBottom);
        }

        if self.status != view.status {
            self.status = view.status.clone();
            if let Some(text) = &view.status {
                cmds.push(ViewCommand::ShowStatus {
                    text: text.clone(),
                    severity: status_severity(view),
                });
            }
        }

        cmds
    }
}

fn status_severity(view: &AppViewModel) -> Severity {
    match view.phase {
        Phase::Done if view.outcome.as_ref().is_some_and(|o| o.success) => Severity::Success,
        Phase::Cancelled => Severity::Warning,
        _ => Severity::Error,
    }
}
