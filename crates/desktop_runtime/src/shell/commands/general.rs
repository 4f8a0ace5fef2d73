use std::rc::Rc;

use system_shell::CommandContext;
use system_shell_contract::{CommandArgSpec, CommandExample, CommandResult, ShellError};

use super::super::{arg, descriptor, BuiltinCommand};

pub(super) fn registrations() -> Vec<BuiltinCommand> {
    vec![
        help_registration(),
        echo_registration(),
        clear_registration(),
        history_registration(),
    ]
}

fn help_registration() -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "help",
            &[],
            "Show this help message",
            "help [command]",
            vec![arg("command", "Optional command name or alias.", false)],
            vec![CommandExample {
                command: "help ls".to_string(),
                summary: "Show usage for one command.".to_string(),
            }],
        ),
        handler: Rc::new(|context: CommandContext| {
            Box::pin(async move {
                let descriptors = context.shell().descriptors();
                if context.args.len() > 1 {
                    return Err(super::super::usage_error("usage: help [command]"));
                }
                if let Some(target) = context.arg(0) {
                    let matched = descriptors
                        .into_iter()
                        .find(|descriptor| descriptor.matches(target))
                        .ok_or_else(|| ShellError::not_found(format!("no help for `{target}`")))?;
                    let mut lines = vec![
                        matched.help.summary.clone(),
                        format!("Usage: {}", matched.help.usage),
                    ];
                    if !matched.aliases.is_empty() {
                        lines.push(format!("Aliases: {}", matched.aliases.join(", ")));
                    }
                    return Ok(CommandResult::text(lines.join("\n")));
                }

                let mut lines = vec!["Available commands:".to_string()];
                for descriptor in descriptors {
                    lines.push(format!(
                        "  {:<22}- {}",
                        descriptor.help.usage, descriptor.help.summary
                    ));
                }
                Ok(CommandResult::text(lines.join("\n")))
            })
        }),
    }
}

fn echo_registration() -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "echo",
            &[],
            "Echo text back",
            "echo [text]",
            vec![CommandArgSpec {
                name: "text".to_string(),
                summary: "Words to print.".to_string(),
                required: false,
                repeatable: true,
            }],
            Vec::new(),
        ),
        handler: Rc::new(|context: CommandContext| {
            Box::pin(async move { Ok(CommandResult::text(context.rest(0))) })
        }),
    }
}

fn clear_registration() -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "clear",
            &["cls"],
            "Clear terminal",
            "clear",
            Vec::new(),
            Vec::new(),
        ),
        handler: Rc::new(|_| Box::pin(async { Ok(CommandResult::clear_screen()) })),
    }
}

fn history_registration() -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "history",
            &[],
            "Show command history",
            "history",
            Vec::new(),
            Vec::new(),
        ),
        handler: Rc::new(|context: CommandContext| {
            Box::pin(async move {
                let lines = context
                    .shell()
                    .history()
                    .iter()
                    .enumerate()
                    .map(|(idx, line)| format!("{:>4}  {line}", idx + 1))
                    .collect::<Vec<_>>();
                Ok(CommandResult::text(lines.join("\n")))
            })
        }),
    }
}
