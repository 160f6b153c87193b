use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use passvault_client_core::controller::UiHost;

/// Terminal prompts. The "clipboard" is standard output so copied passwords
/// can be piped into a platform clipboard tool.
#[derive(Debug, Clone, Copy)]
pub struct TerminalHost {
    assume_yes: bool,
}

impl TerminalHost {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait(?Send)]
impl UiHost for TerminalHost {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{prompt} [y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_affirmative(&answer)
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), String> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}").map_err(|error| error.to_string())
    }
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn assume_yes_skips_prompt() {
        assert!(TerminalHost::new(true).confirm("Delete password?"));
    }
}
