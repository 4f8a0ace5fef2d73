//! Built-in terminal commands bound to the desktop runtime.

use platform_host::FsError;
use system_shell::{CommandHandler, CommandInterpreter};
use system_shell_contract::{
    CommandArgSpec, CommandDescriptor, CommandExample, CommandVisibility, HelpDoc, ShellError,
    ShellErrorCode,
};

use crate::{model::WindowId, processes::Pid, runtime_context::RuntimeContext};

mod commands;

struct BuiltinCommand {
    descriptor: CommandDescriptor,
    handler: CommandHandler,
}

/// Registers every built-in command on `interpreter`, replacing same-named registrations.
pub fn register_builtin_commands(interpreter: &CommandInterpreter, runtime: RuntimeContext) {
    let registrations = commands::builtin_registrations(runtime);
    let count = registrations.len();
    for registration in registrations {
        interpreter.register(registration.descriptor, registration.handler);
    }
    log::debug!("registered {count} built-in commands");
}

fn descriptor(
    name: &str,
    aliases: &[&str],
    summary: &str,
    usage: &str,
    args: Vec<CommandArgSpec>,
    examples: Vec<CommandExample>,
) -> CommandDescriptor {
    CommandDescriptor {
        name: name.to_string(),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        visibility: CommandVisibility::Public,
        args,
        help: HelpDoc {
            summary: summary.to_string(),
            usage: usage.to_string(),
            examples,
        },
    }
}

fn arg(name: &str, summary: &str, required: bool) -> CommandArgSpec {
    CommandArgSpec {
        name: name.to_string(),
        summary: summary.to_string(),
        required,
        repeatable: false,
    }
}

fn usage_error(message: impl Into<String>) -> ShellError {
    ShellError::usage(message)
}

fn unavailable(message: impl Into<String>) -> ShellError {
    ShellError::new(ShellErrorCode::Unavailable, message)
}

fn fs_error(err: FsError) -> ShellError {
    match err {
        FsError::NotFound(_) => ShellError::not_found(err.to_string()),
        FsError::Backend(_) => unavailable(err.to_string()),
    }
}

fn parse_window_id(raw: &str) -> Result<WindowId, ShellError> {
    raw.parse::<u64>()
        .map(WindowId)
        .map_err(|_| usage_error(format!("invalid window id `{raw}`")))
}

fn parse_pid(raw: &str) -> Result<Pid, ShellError> {
    raw.parse::<u32>()
        .map(Pid)
        .map_err(|_| usage_error(format!("invalid pid `{raw}`")))
}
