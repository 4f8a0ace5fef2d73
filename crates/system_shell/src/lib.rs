//! Runtime-agnostic command interpreter with flat name/alias registration and line history.
//!
//! A line is split on whitespace; the first token selects a registered command and the remaining
//! tokens are passed to its handler as positional arguments. Every line is recorded in history
//! before dispatch, and lookup failures come back as ordinary text rather than errors.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use futures::future::LocalBoxFuture;
use system_shell_contract::{
    CommandDescriptor, CommandResult, CommandVisibility, ExecutionId, ShellError, ShellExit,
    ShellRequest, ShellResponse,
};

/// Async command handler.
pub type CommandHandler =
    Rc<dyn Fn(CommandContext) -> LocalBoxFuture<'static, Result<CommandResult, ShellError>>>;

/// Per-invocation context handed to a command handler.
#[derive(Clone)]
pub struct CommandContext {
    /// Execution identifier.
    pub execution_id: ExecutionId,
    /// Canonical descriptor for the resolved command.
    pub descriptor: CommandDescriptor,
    /// Token the user typed to reach this command (name or alias).
    pub invoked_as: String,
    /// Positional argument tokens.
    pub args: Vec<String>,
    /// Raw input line.
    pub line: String,
    /// Optional source window identifier.
    pub source_window_id: Option<u64>,
    shell: ShellHandle,
}

impl CommandContext {
    /// Returns the positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Joins the positional arguments from `start` onward with single spaces.
    pub fn rest(&self, start: usize) -> String {
        self.args.get(start..).unwrap_or_default().join(" ")
    }

    /// Read-only view of the interpreter that dispatched this command.
    pub fn shell(&self) -> &ShellHandle {
        &self.shell
    }
}

/// Weak read-only handle to an interpreter, for handlers that inspect the registry or history.
#[derive(Clone)]
pub struct ShellHandle {
    state: Weak<RefCell<InterpreterState>>,
}

impl ShellHandle {
    /// Public descriptors sorted by name. Empty once the interpreter is dropped.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.state
            .upgrade()
            .map(|state| {
                let descriptors = state.borrow().public_descriptors();
                descriptors
            })
            .unwrap_or_default()
    }

    /// History lines, oldest first. Empty once the interpreter is dropped.
    pub fn history(&self) -> Vec<String> {
        self.state
            .upgrade()
            .map(|state| {
                let history = state.borrow().history.clone();
                history
            })
            .unwrap_or_default()
    }
}

#[derive(Clone)]
struct RegisteredCommand {
    descriptor: CommandDescriptor,
    handler: CommandHandler,
}

#[derive(Default)]
struct InterpreterState {
    commands: BTreeMap<String, RegisteredCommand>,
    history: Vec<String>,
    next_execution_id: u64,
}

impl InterpreterState {
    fn resolve(&self, token: &str) -> Option<RegisteredCommand> {
        self.commands
            .get(token)
            .or_else(|| {
                self.commands
                    .values()
                    .find(|registered| registered.descriptor.matches(token))
            })
            .cloned()
    }

    fn public_descriptors(&self) -> Vec<CommandDescriptor> {
        // BTreeMap iteration is already name-ordered.
        self.commands
            .values()
            .filter(|registered| registered.descriptor.visibility == CommandVisibility::Public)
            .map(|registered| registered.descriptor.clone())
            .collect()
    }
}

/// Shared command interpreter. Clones share registry and history.
#[derive(Clone, Default)]
pub struct CommandInterpreter {
    state: Rc<RefCell<InterpreterState>>,
}

impl CommandInterpreter {
    /// Creates an interpreter with no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `descriptor.name`, silently replacing any previous registration.
    pub fn register(&self, descriptor: CommandDescriptor, handler: CommandHandler) {
        let name = descriptor.name.clone();
        let replaced = self
            .state
            .borrow_mut()
            .commands
            .insert(
                name.clone(),
                RegisteredCommand {
                    descriptor,
                    handler,
                },
            )
            .is_some();
        if replaced {
            log::debug!("command `{name}` re-registered");
        }
    }

    /// Registers a synchronous text command with a default descriptor.
    pub fn register_fn<F>(&self, name: &str, summary: &str, handler: F)
    where
        F: Fn(&[String]) -> String + 'static,
    {
        let handler = Rc::new(handler);
        self.register(
            CommandDescriptor::new(name, summary),
            Rc::new(move |context: CommandContext| {
                let handler = handler.clone();
                Box::pin(async move { Ok(CommandResult::text(handler(&context.args))) })
            }),
        );
    }

    /// Returns `true` when `token` resolves to a registered command.
    pub fn is_registered(&self, token: &str) -> bool {
        self.state.borrow().resolve(token).is_some()
    }

    /// Public descriptors sorted by name.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.state.borrow().public_descriptors()
    }

    /// Every line passed to [`Self::execute`] or [`Self::execute_request`], oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    /// Returns a weak read-only handle to this interpreter.
    pub fn handle(&self) -> ShellHandle {
        ShellHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Executes one line and returns its rendered text.
    pub async fn execute(&self, line: &str) -> String {
        self.execute_request(ShellRequest::new(line)).await.output
    }

    /// Executes one request and returns the full response.
    ///
    /// Blank lines produce empty successful output. Unknown commands produce
    /// `Command not found: <name>` with a not-found exit code. Handler errors are rendered as
    /// `Error: <message>`.
    pub async fn execute_request(&self, request: ShellRequest) -> ShellResponse {
        let execution_id = {
            let mut state = self.state.borrow_mut();
            state.history.push(request.line.clone());
            state.next_execution_id = state.next_execution_id.saturating_add(1);
            ExecutionId(state.next_execution_id)
        };

        let tokens = request
            .line
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let Some((name, args)) = tokens.split_first() else {
            return ShellResponse {
                execution_id,
                command: None,
                output: String::new(),
                clear_screen: false,
                exit: ShellExit::success(),
            };
        };

        let resolved = self.state.borrow().resolve(name);
        let Some(registered) = resolved else {
            let err = ShellError::not_found(format!("Command not found: {name}"));
            log::debug!("execution {}: unknown command `{name}`", execution_id.0);
            return ShellResponse {
                execution_id,
                command: None,
                output: err.message.clone(),
                clear_screen: false,
                exit: ShellExit::from_error(&err),
            };
        };

        let command = registered.descriptor.name.clone();
        let context = CommandContext {
            execution_id,
            descriptor: registered.descriptor,
            invoked_as: name.clone(),
            args: args.to_vec(),
            line: request.line.clone(),
            source_window_id: request.source_window_id,
            shell: self.handle(),
        };
        match (registered.handler)(context).await {
            Ok(result) => ShellResponse {
                execution_id,
                command: Some(command),
                output: result.output,
                clear_screen: result.clear_screen,
                exit: ShellExit::success(),
            },
            Err(err) => {
                log::debug!(
                    "execution {}: `{command}` failed with exit code {}",
                    execution_id.0,
                    err.exit_code()
                );
                ShellResponse {
                    execution_id,
                    command: Some(command),
                    output: format!("Error: {}", err.message),
                    clear_screen: false,
                    exit: ShellExit::from_error(&err),
                }
            }
        }
    }
}
