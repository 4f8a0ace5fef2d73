use std::rc::Rc;

use system_shell::CommandContext;
use system_shell_contract::{CommandExample, CommandResult, ShellError};

use crate::runtime_context::RuntimeContext;

use super::super::{arg, descriptor, fs_error, usage_error, BuiltinCommand};

pub(super) fn registrations(runtime: RuntimeContext) -> Vec<BuiltinCommand> {
    vec![
        ls_registration(runtime.clone()),
        cat_registration(runtime.clone()),
        write_registration(runtime.clone()),
        rm_registration(runtime),
    ]
}

fn ls_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "ls",
            &["dir"],
            "List files in directory",
            "ls [path]",
            vec![arg("path", "Path prefix to list. Defaults to `/`.", false)],
            vec![CommandExample {
                command: "ls /desktop/".to_string(),
                summary: "List desktop files.".to_string(),
            }],
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let path = context.arg(0).unwrap_or("/");
                let files = runtime.fs().list(path).await.map_err(fs_error)?;
                if files.is_empty() {
                    return Ok(CommandResult::text("No files found"));
                }
                Ok(CommandResult::text(files.join("\n")))
            })
        }),
    }
}

fn required_path(context: &CommandContext, usage: &str) -> Result<String, ShellError> {
    context
        .arg(0)
        .map(str::to_string)
        .ok_or_else(|| usage_error(format!("usage: {usage}")))
}

fn cat_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "cat",
            &[],
            "Print file contents",
            "cat <path>",
            vec![arg("path", "File to print.", true)],
            Vec::new(),
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let path = required_path(&context, "cat <path>")?;
                let content = runtime.fs().read(&path).await.map_err(fs_error)?;
                Ok(CommandResult::text(content))
            })
        }),
    }
}

fn write_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "write",
            &[],
            "Write text to a file",
            "write <path> [text]",
            vec![
                arg("path", "File to create or replace.", true),
                arg("text", "Content, joined with single spaces.", false),
            ],
            vec![CommandExample {
                command: "write /documents/todo.txt buy milk".to_string(),
                summary: "Create or overwrite a file.".to_string(),
            }],
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let path = required_path(&context, "write <path> [text]")?;
                let content = context.rest(1);
                runtime
                    .fs()
                    .write(&path, &content)
                    .await
                    .map_err(fs_error)?;
                Ok(CommandResult::text(format!(
                    "Wrote {} bytes to {path}",
                    content.len()
                )))
            })
        }),
    }
}

fn rm_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "rm",
            &["del"],
            "Delete a file",
            "rm <path>",
            vec![arg("path", "File to delete.", true)],
            Vec::new(),
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let path = required_path(&context, "rm <path>")?;
                let fs = runtime.fs();
                if !fs.exists(&path).await.map_err(fs_error)? {
                    return Err(ShellError::not_found(format!("File not found: {path}")));
                }
                fs.delete(&path).await.map_err(fs_error)?;
                Ok(CommandResult::text(format!("Removed {path}")))
            })
        }),
    }
}
