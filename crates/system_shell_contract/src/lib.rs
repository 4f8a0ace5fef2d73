//! Shared shell command contracts used by the command interpreter, runtime integration, and
//! terminal sessions.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable command metadata,
//! execution requests, and completion payloads without depending on the file store, the window
//! manager, or any host API.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution identifier for a command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExecutionId(pub u64);

/// Visibility policy for registered commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CommandVisibility {
    /// Command is listed in help.
    #[default]
    Public,
    /// Command is callable but omitted from help.
    Hidden,
}

/// Positional argument specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArgSpec {
    /// Human-readable argument label.
    pub name: String,
    /// Short description.
    pub summary: String,
    /// Whether this argument is required.
    pub required: bool,
    /// Whether this argument consumes remaining values.
    pub repeatable: bool,
}

/// Example invocation rendered in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExample {
    /// Example command line.
    pub command: String,
    /// Example explanation.
    pub summary: String,
}

/// Complete help metadata for a registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpDoc {
    /// Summary sentence.
    pub summary: String,
    /// Usage string displayed in help output.
    pub usage: String,
    /// Example invocations.
    pub examples: Vec<CommandExample>,
}

/// Full command registration metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Canonical command name, matched against the first token of a line.
    pub name: String,
    /// Alternate names, such as `dir` for `ls`.
    pub aliases: Vec<String>,
    /// Visibility policy.
    pub visibility: CommandVisibility,
    /// Positional argument metadata.
    pub args: Vec<CommandArgSpec>,
    /// Help metadata.
    pub help: HelpDoc,
}

impl CommandDescriptor {
    /// Creates a public descriptor with no args whose usage is just the name.
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            help: HelpDoc {
                summary: summary.into(),
                usage: name.clone(),
                examples: Vec::new(),
            },
            name,
            aliases: Vec::new(),
            visibility: CommandVisibility::Public,
            args: Vec::new(),
        }
    }

    /// Returns `true` when `token` names this command or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|alias| alias == token)
    }
}

/// Shell execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRequest {
    /// Input line to parse and execute.
    pub line: String,
    /// Optional source window identifier.
    pub source_window_id: Option<u64>,
}

impl ShellRequest {
    /// Creates a request with no source window.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            source_window_id: None,
        }
    }
}

/// Successful handler output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandResult {
    /// Text shown to the user. May be empty.
    pub output: String,
    /// Whether the terminal should clear its transcript.
    pub clear_screen: bool,
}

impl CommandResult {
    /// Plain text output.
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            clear_screen: false,
        }
    }

    /// Empty output that asks the terminal to clear itself.
    pub fn clear_screen() -> Self {
        Self {
            output: String::new(),
            clear_screen: true,
        }
    }
}

/// Response for one executed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellResponse {
    /// Execution identifier.
    pub execution_id: ExecutionId,
    /// Canonical command name if one was matched.
    pub command: Option<String>,
    /// Rendered text, including rendered errors.
    pub output: String,
    /// Whether the terminal should clear its transcript.
    pub clear_screen: bool,
    /// Process-style exit metadata.
    pub exit: ShellExit,
}

/// Shell exit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellExit {
    /// Numeric exit code.
    pub code: i32,
    /// Optional explanatory message.
    pub message: Option<String>,
}

impl ShellExit {
    /// Successful command completion.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    /// Exit status for a failed command.
    pub fn from_error(err: &ShellError) -> Self {
        Self {
            code: err.exit_code(),
            message: Some(err.message.clone()),
        }
    }

    /// Returns `true` for exit code zero.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Structured shell error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellErrorCode {
    /// User input violated command usage.
    Usage,
    /// The command or its target was not found.
    NotFound,
    /// The command is unavailable in this host context.
    Unavailable,
    /// The caller lacks permission to perform the action.
    PermissionDenied,
    /// Internal command or runtime failure.
    Internal,
}

/// Error emitted by command lookup or handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellError {
    /// Error category.
    pub code: ShellErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ShellErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Usage, message)
    }

    /// Not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::NotFound, message)
    }

    /// Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Internal, message)
    }

    /// Converts the error into a conventional exit code.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ShellErrorCode::Usage => 2,
            ShellErrorCode::NotFound => 3,
            ShellErrorCode::Unavailable | ShellErrorCode::PermissionDenied => 4,
            ShellErrorCode::Internal => 5,
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        let cases = [
            (ShellErrorCode::Usage, 2),
            (ShellErrorCode::NotFound, 3),
            (ShellErrorCode::Unavailable, 4),
            (ShellErrorCode::PermissionDenied, 4),
            (ShellErrorCode::Internal, 5),
        ];
        for (code, expected) in cases {
            let err = ShellError::new(code, "x");
            assert_eq!(err.exit_code(), expected);
            assert_eq!(ShellExit::from_error(&err).code, expected);
        }
        assert!(ShellExit::success().is_success());
    }

    #[test]
    fn descriptor_matches_name_and_aliases() {
        let mut descriptor = CommandDescriptor::new("ls", "List files.");
        descriptor.aliases.push("dir".to_string());

        assert!(descriptor.matches("ls"));
        assert!(descriptor.matches("dir"));
        assert!(!descriptor.matches("l"));
        assert_eq!(descriptor.help.usage, "ls");
    }

    #[test]
    fn response_serializes_with_kebab_case_error_codes() {
        let err = ShellError::usage("usage: cat <path>");
        let value = serde_json::to_value(&err).expect("serialize");
        assert_eq!(value["code"], "usage");

        let response = ShellResponse {
            execution_id: ExecutionId(7),
            command: Some("cat".to_string()),
            output: err.to_string(),
            clear_screen: false,
            exit: ShellExit::from_error(&err),
        };
        let json = serde_json::to_string(&response).expect("serialize");
        let back: ShellResponse = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, response);
    }
}
