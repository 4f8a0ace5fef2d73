//! Window-manager transition helpers shared by the reducer and the [`WindowManager`] facade.
//!
//! Every helper takes the explicit [`DesktopState`] and returns whether anything changed. Unknown
//! window ids and disallowed state transitions are no-ops.

use crate::{
    config::{DesktopConfig, WindowConfig},
    model::{
        DesktopState, OpenWindowRequest, WindowId, WindowRecord, WindowRect, WindowSize,
        WindowState,
    },
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    views,
};

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn next_z_index(state: &mut DesktopState) -> u64 {
    let z = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z
}

/// Staggered position for the next window opened without coordinates.
pub fn cascade_position(config: &WindowConfig, open_count: usize) -> (i32, i32) {
    let slot = (open_count % config.cascade_wrap.max(1) as usize) as i32;
    (
        config.cascade_origin_x + slot * config.cascade_step,
        config.cascade_origin_y + slot * config.cascade_step,
    )
}

/// Opens a window, raises it above every other window and focuses it.
pub fn open_window(
    state: &mut DesktopState,
    config: &WindowConfig,
    req: OpenWindowRequest,
) -> WindowId {
    let min_size = req.min_size.unwrap_or_else(|| config.min_size());
    let rect = req
        .rect
        .unwrap_or_else(|| {
            let (x, y) = cascade_position(config, state.windows.len());
            let size = config.default_size();
            WindowRect {
                x,
                y,
                w: size.w,
                h: size.h,
            }
        })
        .clamped_min(min_size);

    let id = next_window_id(state);
    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        id,
        kind: req.kind,
        title: req.title.unwrap_or_else(|| req.kind.title().to_string()),
        icon_id: req
            .icon_id
            .unwrap_or_else(|| req.kind.icon_id().to_string()),
        rect,
        min_size,
        state: WindowState::Normal,
        z_index,
        flags: req.flags,
        payload: req.payload,
    });
    state.focused = Some(id);
    log::debug!("opened window {} ({})", id.0, req.kind.canonical_id());
    id
}

/// Removes a window in any state.
///
/// When the closed window held focus, focus is cleared, or with `refocus` handed to the highest
/// remaining non-minimized window.
pub fn close_window(state: &mut DesktopState, window_id: WindowId, refocus: bool) -> bool {
    let before = state.windows.len();
    state.windows.retain(|w| w.id != window_id);
    if state.windows.len() == before {
        return false;
    }
    if state.focused == Some(window_id) {
        state.focused = if refocus {
            views::topmost_window_id(state)
        } else {
            None
        };
    }
    log::debug!("closed window {}", window_id.0);
    true
}

/// Focuses a window. A window that already holds the highest z-index keeps it; any other window
/// is raised to a fresh z-index. The window state is never changed.
pub fn focus_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let top_z = state.windows.iter().map(|w| w.z_index).max();
    let Some(current_z) = state.window(window_id).map(|w| w.z_index) else {
        return false;
    };
    if top_z != Some(current_z) {
        let z_index = next_z_index(state);
        if let Some(window) = state.window_mut(window_id) {
            window.z_index = z_index;
        }
    }
    state.focused = Some(window_id);
    true
}

fn transition(
    state: &mut DesktopState,
    window_id: WindowId,
    from: &[WindowState],
    to: WindowState,
) -> bool {
    match state.window_mut(window_id) {
        Some(window) if from.contains(&window.state) => {
            window.state = to;
            true
        }
        _ => false,
    }
}

/// Normal -> Minimized.
pub fn minimize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    transition(
        state,
        window_id,
        &[WindowState::Normal],
        WindowState::Minimized,
    )
}

/// Normal -> Maximized. The stored rect is kept for restore.
pub fn maximize_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    transition(
        state,
        window_id,
        &[WindowState::Normal],
        WindowState::Maximized,
    )
}

/// Minimized or Maximized -> Normal.
pub fn restore_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    transition(
        state,
        window_id,
        &[WindowState::Minimized, WindowState::Maximized],
        WindowState::Normal,
    )
}

/// Moves the stored rect. No-op for non-draggable windows.
pub fn move_window(state: &mut DesktopState, window_id: WindowId, x: i32, y: i32) -> bool {
    match state.window_mut(window_id) {
        Some(window) if window.flags.draggable => {
            window.rect.x = x;
            window.rect.y = y;
            true
        }
        _ => false,
    }
}

/// Resizes the stored rect, clamping each axis to the window's minimum size. No-op for
/// non-resizable windows.
pub fn resize_window(state: &mut DesktopState, window_id: WindowId, w: i32, h: i32) -> bool {
    match state.window_mut(window_id) {
        Some(window) if window.flags.resizable => {
            let size = WindowSize { w, h }.clamped_min(window.min_size);
            window.rect.w = size.w;
            window.rect.h = size.h;
            true
        }
        _ => false,
    }
}

/// Owns the desktop state and its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowManager {
    state: DesktopState,
    config: DesktopConfig,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl WindowManager {
    pub fn new(config: DesktopConfig) -> Self {
        let state = DesktopState::new(config.window.first_z_index, config.desktop.viewport());
        Self { state, config }
    }

    pub fn from_state(state: DesktopState, config: DesktopConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Runs `action` through the reducer and returns the effects it produced.
    pub fn apply(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        reduce_desktop(&mut self.state, &self.config, action)
    }

    pub fn open(&mut self, req: OpenWindowRequest) -> WindowId {
        open_window(&mut self.state, &self.config.window, req)
    }

    pub fn close(&mut self, window_id: WindowId) -> bool {
        close_window(
            &mut self.state,
            window_id,
            self.config.window.refocus_on_close,
        )
    }

    pub fn focus(&mut self, window_id: WindowId) -> bool {
        focus_window(&mut self.state, window_id)
    }

    pub fn minimize(&mut self, window_id: WindowId) -> bool {
        minimize_window(&mut self.state, window_id)
    }

    pub fn maximize(&mut self, window_id: WindowId) -> bool {
        maximize_window(&mut self.state, window_id)
    }

    pub fn restore(&mut self, window_id: WindowId) -> bool {
        restore_window(&mut self.state, window_id)
    }

    pub fn move_to(&mut self, window_id: WindowId, x: i32, y: i32) -> bool {
        move_window(&mut self.state, window_id, x, y)
    }

    pub fn resize(&mut self, window_id: WindowId, w: i32, h: i32) -> bool {
        resize_window(&mut self.state, window_id, w, h)
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.state.window(window_id)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.state.focused_window_id()
    }

    pub fn topmost_window_id(&self) -> Option<WindowId> {
        views::topmost_window_id(&self.state)
    }

    pub fn compositor_stack(&self) -> Vec<&WindowRecord> {
        views::compositor_stack(&self.state)
    }

    pub fn taskbar_windows(&self) -> Vec<&WindowRecord> {
        views::taskbar_windows(&self.state)
    }

    pub fn effective_rect(&self, window_id: WindowId) -> Option<WindowRect> {
        views::effective_rect(&self.state, window_id, self.config.desktop.taskbar_height)
    }
}
