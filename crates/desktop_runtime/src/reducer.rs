//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use serde::{Deserialize, Serialize};

use crate::{
    config::DesktopConfig,
    model::{DesktopSnapshot, DesktopState, OpenWindowRequest, WindowId, WindowKind, WindowSize},
    window_manager::{
        close_window, focus_window, maximize_window, minimize_window, move_window, open_window,
        resize_window, restore_window,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a normal window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a normal window to the viewport.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Restore a minimized or maximized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Move a window's stored rect.
    MoveWindow {
        /// Window being dragged.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Resize a window's stored rect.
    ResizeWindow {
        /// Window being resized.
        window_id: WindowId,
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// Taskbar click: restore and focus a minimized window, focus anything else.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Host viewport changed.
    SetViewport {
        /// Viewport width.
        width: i32,
        /// Viewport height.
        height: i32,
    },
    /// Replace runtime state with a persisted snapshot.
    HydrateSnapshot {
        /// Snapshot payload to restore.
        snapshot: DesktopSnapshot,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// A window was added to the registry.
    WindowOpened {
        /// New window.
        window_id: WindowId,
        /// Its kind.
        kind: WindowKind,
    },
    /// A window was removed from the registry.
    WindowClosed {
        /// Removed window.
        window_id: WindowId,
    },
    /// Move keyboard focus into the window's primary input.
    FocusWindowInput(WindowId),
    /// Persist the current desktop layout snapshot.
    PersistLayout,
}

/// Applies a [`DesktopAction`] to `state` and collects the resulting side effects.
///
/// Actions that reference unknown windows, or request a transition the window's current state
/// does not allow, leave `state` untouched and produce no effects.
pub fn reduce_desktop(
    state: &mut DesktopState,
    config: &DesktopConfig,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let kind = req.kind;
            let window_id = open_window(state, &config.window, req);
            effects.push(RuntimeEffect::WindowOpened { window_id, kind });
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::CloseWindow { window_id } => {
            let was_focused = state.focused == Some(window_id);
            if close_window(state, window_id, config.window.refocus_on_close) {
                effects.push(RuntimeEffect::WindowClosed { window_id });
                if let Some(next) = state.focused.filter(|_| was_focused) {
                    effects.push(RuntimeEffect::FocusWindowInput(next));
                }
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window(state, window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if minimize_window(state, window_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            if maximize_window(state, window_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            if restore_window(state, window_id) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::MoveWindow { window_id, x, y } => {
            if move_window(state, window_id, x, y) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ResizeWindow {
            window_id,
            width,
            height,
        } => {
            if resize_window(state, window_id, width, height) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let Some(minimized) = state.window(window_id).map(|w| w.is_minimized()) else {
                return effects;
            };
            if minimized {
                restore_window(state, window_id);
            }
            focus_window(state, window_id);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::SetViewport { width, height } => {
            state.viewport = WindowSize {
                w: width,
                h: height,
            };
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            effects.extend(
                state
                    .windows
                    .iter()
                    .map(|w| RuntimeEffect::WindowClosed { window_id: w.id }),
            );
            let mut restored =
                DesktopState::from_snapshot(snapshot, config.window.first_z_index, state.viewport);
            restored.next_window_id = restored.next_window_id.max(state.next_window_id);
            restored.next_z_index = restored.next_z_index.max(state.next_z_index);
            *state = restored;
            effects.extend(state.windows.iter().map(|w| RuntimeEffect::WindowOpened {
                window_id: w.id,
                kind: w.kind,
            }));
            log::debug!("hydrated {} window(s) from snapshot", state.windows.len());
        }
    }
    effects
}
