//! Headless terminal transcript bound to a command interpreter.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use system_shell::CommandInterpreter;
use system_shell_contract::{ShellRequest, ShellResponse};

const MAX_TERMINAL_ENTRIES: usize = 200;

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum TranscriptEntry {
    /// Banner and other session messages.
    System(String),
    /// Echo of a submitted line.
    Prompt(String),
    /// Successful command output.
    Output(String),
    /// Failed command output.
    Error(String),
}

impl TranscriptEntry {
    /// Renders the entry as displayed text.
    pub fn render(&self) -> String {
        match self {
            Self::Prompt(command) => format!("$ {command}"),
            Self::System(text) | Self::Output(text) | Self::Error(text) => text.clone(),
        }
    }
}

fn default_transcript() -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::System("Desktop Terminal".to_string()),
        TranscriptEntry::System("Type `help` for commands.".to_string()),
    ]
}

/// Terminal window state: transcript plus a cursor into the interpreter history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSession {
    window_id: Option<u64>,
    transcript: Vec<TranscriptEntry>,
    history_cursor: Option<usize>,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TerminalSession {
    /// Creates a session showing the banner, tagged with its owning window if any.
    pub fn new(window_id: Option<u64>) -> Self {
        Self {
            window_id,
            transcript: default_transcript(),
            history_cursor: None,
        }
    }

    /// Transcript entries, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Transcript rendered as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.transcript.iter().map(TranscriptEntry::render).collect()
    }

    /// Empties the transcript.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
        if self.transcript.len() > MAX_TERMINAL_ENTRIES {
            let overflow = self.transcript.len() - MAX_TERMINAL_ENTRIES;
            self.transcript.drain(0..overflow);
            log::trace!("terminal transcript trimmed by {overflow}");
        }
    }

    /// Runs `line` through `interpreter` and records prompt and output.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn submit(
        &mut self,
        interpreter: &CommandInterpreter,
        line: &str,
    ) -> Option<ShellResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.history_cursor = None;
        self.push(TranscriptEntry::Prompt(line.to_string()));

        let response = interpreter
            .execute_request(ShellRequest {
                line: line.to_string(),
                source_window_id: self.window_id,
            })
            .await;

        if response.clear_screen {
            self.clear();
        } else if !response.output.is_empty() {
            let failed = !response.exit.is_success();
            for text in response.output.lines() {
                let text = text.to_string();
                self.push(if failed {
                    TranscriptEntry::Error(text)
                } else {
                    TranscriptEntry::Output(text)
                });
            }
        }
        Some(response)
    }

    /// Steps back through interpreter history, returning the line to place in the input.
    pub fn previous_command(&mut self, interpreter: &CommandInterpreter) -> Option<String> {
        let history = interpreter.history();
        if history.is_empty() {
            return None;
        }
        let next = match self.history_cursor {
            Some(0) => 0,
            Some(idx) => idx - 1,
            None => history.len() - 1,
        };
        self.history_cursor = Some(next);
        history.get(next).cloned()
    }

    /// Steps forward through interpreter history; past the newest entry the input is emptied.
    pub fn next_command(&mut self, interpreter: &CommandInterpreter) -> Option<String> {
        let history = interpreter.history();
        let idx = self.history_cursor?;
        if idx + 1 >= history.len() {
            self.history_cursor = None;
            return Some(String::new());
        }
        self.history_cursor = Some(idx + 1);
        history.get(idx + 1).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use system_shell_contract::{CommandDescriptor, CommandResult};

    use super::*;

    fn interpreter() -> CommandInterpreter {
        let interpreter = CommandInterpreter::new();
        interpreter.register_fn("echo", "Print arguments.", |args| args.join(" "));
        interpreter.register(
            CommandDescriptor::new("clear", "Clear the terminal."),
            Rc::new(|_| Box::pin(async { Ok(CommandResult::clear_screen()) })),
        );
        interpreter
    }

    #[test]
    fn submit_echoes_prompt_and_output() {
        let shell = interpreter();
        let mut session = TerminalSession::default();

        block_on(session.submit(&shell, "echo hi there"));
        block_on(session.submit(&shell, "nope"));

        assert_eq!(
            session.lines(),
            vec![
                "Desktop Terminal",
                "Type `help` for commands.",
                "$ echo hi there",
                "hi there",
                "$ nope",
                "Command not found: nope",
            ]
        );
        assert!(matches!(
            session.transcript().last(),
            Some(TranscriptEntry::Error(_))
        ));
    }

    #[test]
    fn clear_empties_transcript_and_blank_input_is_ignored() {
        let shell = interpreter();
        let mut session = TerminalSession::new(Some(3));

        assert!(block_on(session.submit(&shell, "   ")).is_none());
        let response = block_on(session.submit(&shell, "clear")).expect("response");

        assert!(response.clear_screen);
        assert!(session.transcript().is_empty());
        assert_eq!(shell.history(), vec!["clear".to_string()]);
    }

    #[test]
    fn transcript_is_capped() {
        let shell = interpreter();
        let mut session = TerminalSession::default();
        for idx in 0..150 {
            block_on(session.submit(&shell, &format!("echo {idx}")));
        }

        assert_eq!(session.transcript().len(), MAX_TERMINAL_ENTRIES);
        assert_eq!(
            session.lines().last().map(String::as_str),
            Some("149")
        );
    }

    #[test]
    fn history_navigation_walks_interpreter_history() {
        let shell = interpreter();
        let mut session = TerminalSession::default();
        block_on(session.submit(&shell, "echo a"));
        block_on(session.submit(&shell, "echo b"));

        assert_eq!(session.previous_command(&shell), Some("echo b".to_string()));
        assert_eq!(session.previous_command(&shell), Some("echo a".to_string()));
        assert_eq!(session.previous_command(&shell), Some("echo a".to_string()));
        assert_eq!(session.next_command(&shell), Some("echo b".to_string()));
        assert_eq!(session.next_command(&shell), Some(String::new()));
        assert_eq!(session.next_command(&shell), None);
    }

    #[test]
    fn entries_serialize_with_kind_and_text() {
        let json = serde_json::to_value(TranscriptEntry::Prompt("ls".to_string()))
            .expect("serialize");
        assert_eq!(json["kind"], "prompt");
        assert_eq!(json["text"], "ls");
    }
}
