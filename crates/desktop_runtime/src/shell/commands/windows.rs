use std::rc::Rc;

use system_shell::CommandContext;
use system_shell_contract::{CommandExample, CommandResult, ShellError};

use crate::{
    model::{OpenWindowRequest, WindowId, WindowKind, WindowState},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::RuntimeContext,
};

use super::super::{arg, descriptor, parse_window_id, usage_error, BuiltinCommand};

pub(super) fn registrations(runtime: RuntimeContext) -> Vec<BuiltinCommand> {
    vec![
        windows_list_registration(runtime.clone()),
        open_registration(runtime.clone()),
        simple_window_registration(runtime.clone(), "close", "Close a window", |window_id| {
            DesktopAction::CloseWindow { window_id }
        }),
        simple_window_registration(runtime.clone(), "focus", "Focus a window", |window_id| {
            DesktopAction::FocusWindow { window_id }
        }),
        simple_window_registration(
            runtime.clone(),
            "minimize",
            "Minimize a window",
            |window_id| DesktopAction::MinimizeWindow { window_id },
        ),
        simple_window_registration(
            runtime.clone(),
            "maximize",
            "Maximize a window",
            |window_id| DesktopAction::MaximizeWindow { window_id },
        ),
        simple_window_registration(runtime, "restore", "Restore a window", |window_id| {
            DesktopAction::RestoreWindow { window_id }
        }),
    ]
}

fn state_label(state: WindowState) -> &'static str {
    match state {
        WindowState::Normal => "normal",
        WindowState::Minimized => "minimized",
        WindowState::Maximized => "maximized",
    }
}

fn windows_list_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "windows",
            &[],
            "List open windows",
            "windows",
            Vec::new(),
            Vec::new(),
        ),
        handler: Rc::new(move |_| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let state = runtime.state();
                if state.windows.is_empty() {
                    return Ok(CommandResult::text("No open windows"));
                }
                let lines = state
                    .windows
                    .iter()
                    .map(|w| {
                        let marker = if state.focused == Some(w.id) { " *" } else { "" };
                        format!(
                            "{}\t{}\t{}\t{}{marker}",
                            w.id.0,
                            w.kind.canonical_id(),
                            state_label(w.state),
                            w.title
                        )
                    })
                    .collect::<Vec<_>>();
                Ok(CommandResult::text(lines.join("\n")))
            })
        }),
    }
}

fn parse_window_kind(raw: &str) -> Option<WindowKind> {
    WindowKind::from_canonical_id(raw).or_else(|| {
        WindowKind::ALL
            .into_iter()
            .find(|kind| kind.process_name() == raw)
    })
}

fn open_registration(runtime: RuntimeContext) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            "open",
            &[],
            "Open a window",
            "open <kind> [path]",
            vec![
                arg(
                    "kind",
                    "terminal, file-explorer, text-editor or settings.",
                    true,
                ),
                arg("path", "File or directory for explorer and editor windows.", false),
            ],
            vec![CommandExample {
                command: "open text-editor /desktop/notes.txt".to_string(),
                summary: "Edit a file in a new window.".to_string(),
            }],
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let raw = context
                    .arg(0)
                    .ok_or_else(|| usage_error("usage: open <kind> [path]"))?;
                let kind = parse_window_kind(raw)
                    .ok_or_else(|| usage_error(format!("unknown window kind `{raw}`")))?;
                let mut request = OpenWindowRequest::new(kind);
                if let Some(path) = context.arg(1) {
                    if let Some(name) = path.rsplit('/').find(|segment| !segment.is_empty()) {
                        request = request.with_title(name);
                    }
                    request = request.with_path(path);
                }

                let effects = runtime.dispatch(DesktopAction::OpenWindow(request)).await;
                let window_id = effects
                    .iter()
                    .find_map(|effect| match effect {
                        RuntimeEffect::WindowOpened { window_id, .. } => Some(*window_id),
                        _ => None,
                    })
                    .ok_or_else(|| ShellError::internal("window was not opened"))?;
                Ok(CommandResult::text(format!(
                    "Opened {} window {}",
                    kind.canonical_id(),
                    window_id.0
                )))
            })
        }),
    }
}

fn simple_window_registration(
    runtime: RuntimeContext,
    name: &'static str,
    summary: &'static str,
    builder: fn(WindowId) -> DesktopAction,
) -> BuiltinCommand {
    BuiltinCommand {
        descriptor: descriptor(
            name,
            &[],
            summary,
            &format!("{name} <window-id>"),
            vec![arg("window-id", "Window id from `windows`.", true)],
            Vec::new(),
        ),
        handler: Rc::new(move |context: CommandContext| {
            let runtime = runtime.clone();
            Box::pin(async move {
                let raw = context
                    .arg(0)
                    .ok_or_else(|| usage_error(format!("usage: {name} <window-id>")))?;
                let window_id = parse_window_id(raw)?;
                if runtime.state().window(window_id).is_none() {
                    return Err(ShellError::not_found(format!(
                        "No such window: {}",
                        window_id.0
                    )));
                }
                let effects = runtime.dispatch(builder(window_id)).await;
                if effects.is_empty() {
                    return Ok(CommandResult::text(format!(
                        "Window {} unchanged",
                        window_id.0
                    )));
                }
                Ok(CommandResult::text(format!("{name} {}", window_id.0)))
            })
        }),
    }
}
