use std::rc::Rc;

use system_shell::CommandContext;
use system_shell_contract::{CommandResult, ShellError};

use crate::{reducer::DesktopAction, runtime_context::RuntimeContext};

use super::super::{arg, descriptor, parse_pid, usage_error, BuiltinCommand};

pub(super) fn registrations(runtime: RuntimeContext) -> Vec<BuiltinCommand> {
    vec![ps_registration(runtime.clone()), kill_registration(runtime)]
}

fn ps_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "ps",
            &[],
            "List running processes",
            "ps",
            Vec::new(),
            Vec::new(),
        ),
        handler: Rc::new(move |_| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let processes = runtime.processes().list();
                if processes.is_empty() {
                    return Ok(CommandResult::text("No running processes"));
                }
                let lines = processes
                    .iter()
                    .map(|p| format!("{}\t{}\t{}", p.pid, p.name, p.status.label()))
                    .collect::<Vec<_>>();
                Ok(CommandResult::text(lines.join("\n")))
            })
        }),
    }
}

fn kill_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "kill",
            &[],
            "Terminate a process and its window",
            "kill <pid>",
            vec![arg("pid", "Process id from `ps`.", true)],
            Vec::new(),
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let raw = context
                    .arg(0)
                    .ok_or_else(|| usage_error("usage: kill <pid>"))?;
                let pid = parse_pid(raw)?;
                let info = runtime
                    .processes()
                    .get(pid)
                    .ok_or_else(|| ShellError::not_found(format!("No such process: {pid}")))?;
                match info.window_id {
                    // Closing the window removes the process through the close effect.
                    Some(window_id) => {
                        runtime
                            .dispatch(DesktopAction::CloseWindow { window_id })
                            .await;
                    }
                    None => {
                        runtime.processes().kill(pid);
                    }
                }
                Ok(CommandResult::text(format!(
                    "Killed process {pid} ({})",
                    info.name
                )))
            })
        }),
    }
}
