use rustyline::{DefaultEditor, error::ReadlineError};
use std::io::Write;

use unroll_core::prompt::LineSource;

/// Line editor for interactive terminals: arrow keys and in-session history
/// while answering prompts. Piped input goes through `StreamLines` instead.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>> {
        // Anything the caller buffered must reach the screen before the editor redraws the prompt.
        out.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => anyhow::bail!("interrupted"),
            Err(e) => Err(anyhow::anyhow!("Readline error: {}", e)),
        }
    }
}
