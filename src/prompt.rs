use std::io::{self, BufRead, Write};

/// Interactive gate for destructive actions and free-text input.
pub trait Prompter {
    fn confirm(&mut self, message: &str) -> bool;

    /// `None` when the user cancels. Empty answers count as cancelled.
    fn prompt_text(&mut self, message: &str) -> Option<String>;
}

/// Reads answers from stdin. `assume_yes` skips confirmations and a preset
/// answer is returned for text prompts without asking.
pub struct TerminalPrompter {
    pub assume_yes: bool,
    pub preset_text: Option<String>,
}

impl TerminalPrompter {
    fn read_line(message: &str) -> Option<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{} ", message);
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from stdin");
                None
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let answer = Self::read_line(&format!("{} [y/N]", message))
            .unwrap_or_default()
            .to_lowercase();
        matches!(answer.as_str(), "y" | "yes")
    }

    fn prompt_text(&mut self, message: &str) -> Option<String> {
        let answer = match self.preset_text.take() {
            Some(text) => Some(text),
            None => Self::read_line(message),
        };

        answer
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
