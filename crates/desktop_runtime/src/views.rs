//! Read-only projections of [`DesktopState`] consumed by hosts.

use platform_host::{FileEntry, FileEntryKind};
use serde::{Deserialize, Serialize};

use crate::model::{
    DesktopState, OpenWindowRequest, WindowId, WindowKind, WindowRecord, WindowRect, WindowSize,
    WindowState,
};

/// Side length of one desktop icon cell.
pub const DESKTOP_ICON_CELL: i32 = 80;
/// Gap between icon cells.
pub const DESKTOP_ICON_GAP: i32 = 8;
/// Padding between the viewport edge and the icon grid.
pub const DESKTOP_ICON_PADDING: i32 = 16;

/// Non-minimized windows, back to front.
pub fn compositor_stack(state: &DesktopState) -> Vec<&WindowRecord> {
    let mut stack = state
        .windows
        .iter()
        .filter(|w| !w.is_minimized())
        .collect::<Vec<_>>();
    stack.sort_by_key(|w| w.z_index);
    stack
}

/// Every window in open order, minimized ones included.
pub fn taskbar_windows(state: &DesktopState) -> Vec<&WindowRecord> {
    state.windows.iter().collect()
}

/// Highest non-minimized window.
pub fn topmost_window_id(state: &DesktopState) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| !w.is_minimized())
        .max_by_key(|w| w.z_index)
        .map(|w| w.id)
}

/// Rectangle a window actually occupies. Maximized windows fill the viewport above the taskbar;
/// every other state uses the stored rect.
pub fn effective_rect(
    state: &DesktopState,
    window_id: WindowId,
    taskbar_height: i32,
) -> Option<WindowRect> {
    let window = state.window(window_id)?;
    Some(match window.state {
        WindowState::Maximized => maximized_rect(state.viewport, taskbar_height),
        WindowState::Normal | WindowState::Minimized => window.rect,
    })
}

fn maximized_rect(viewport: WindowSize, taskbar_height: i32) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: viewport.w,
        h: (viewport.h - taskbar_height).max(0),
    }
}

/// One taskbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarButton {
    pub window_id: WindowId,
    pub title: String,
    pub icon_id: String,
    pub focused: bool,
    pub minimized: bool,
}

pub fn taskbar_buttons(state: &DesktopState) -> Vec<TaskbarButton> {
    taskbar_windows(state)
        .into_iter()
        .map(|w| TaskbarButton {
            window_id: w.id,
            title: w.title.clone(),
            icon_id: w.icon_id.clone(),
            focused: state.focused == Some(w.id),
            minimized: w.is_minimized(),
        })
        .collect()
}

/// Desktop shortcut for one entry of the desktop directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub entry: FileEntry,
    pub icon_id: String,
    /// Grid cell in viewport coordinates.
    pub cell: WindowRect,
    /// Window opened when the icon is activated.
    pub open: OpenWindowRequest,
}

fn entry_icon_id(entry: &FileEntry) -> &'static str {
    match entry.kind {
        FileEntryKind::Directory => "folder",
        FileEntryKind::File if entry.name.ends_with(".txt") => "file-text",
        FileEntryKind::File => "file",
    }
}

/// Number of icon columns that fit in `viewport_width`; never less than one.
pub fn desktop_icon_columns(viewport_width: i32) -> i32 {
    let usable = viewport_width - 2 * DESKTOP_ICON_PADDING + DESKTOP_ICON_GAP;
    (usable / (DESKTOP_ICON_CELL + DESKTOP_ICON_GAP)).max(1)
}

/// Lays `entries` out row-major on the icon grid.
pub fn desktop_icons(entries: &[FileEntry], viewport: WindowSize) -> Vec<DesktopIcon> {
    let columns = desktop_icon_columns(viewport.w);
    let stride = DESKTOP_ICON_CELL + DESKTOP_ICON_GAP;
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let idx = idx as i32;
            let kind = if entry.is_directory() {
                WindowKind::FileExplorer
            } else {
                WindowKind::TextEditor
            };
            DesktopIcon {
                entry: entry.clone(),
                icon_id: entry_icon_id(entry).to_string(),
                cell: WindowRect {
                    x: DESKTOP_ICON_PADDING + (idx % columns) * stride,
                    y: DESKTOP_ICON_PADDING + (idx / columns) * stride,
                    w: DESKTOP_ICON_CELL,
                    h: DESKTOP_ICON_CELL,
                },
                open: OpenWindowRequest::new(kind)
                    .with_title(entry.name.clone())
                    .with_path(entry.path.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::WindowConfig, window_manager};

    fn open(state: &mut DesktopState, kind: WindowKind) -> WindowId {
        window_manager::open_window(state, &WindowConfig::default(), OpenWindowRequest::new(kind))
    }

    #[test]
    fn taskbar_keeps_open_order_while_compositor_follows_z() {
        let mut state = DesktopState::default();
        let a = open(&mut state, WindowKind::Terminal);
        let b = open(&mut state, WindowKind::FileExplorer);
        let c = open(&mut state, WindowKind::TextEditor);
        window_manager::focus_window(&mut state, a);
        window_manager::minimize_window(&mut state, b);

        let taskbar = taskbar_windows(&state)
            .iter()
            .map(|w| w.id)
            .collect::<Vec<_>>();
        let stack = compositor_stack(&state)
            .iter()
            .map(|w| w.id)
            .collect::<Vec<_>>();
        assert_eq!(taskbar, vec![a, b, c]);
        assert_eq!(stack, vec![c, a]);
        assert_eq!(topmost_window_id(&state), Some(a));
    }

    #[test]
    fn taskbar_buttons_flag_focus_and_minimized() {
        let mut state = DesktopState::default();
        let a = open(&mut state, WindowKind::Terminal);
        let b = open(&mut state, WindowKind::Settings);
        window_manager::minimize_window(&mut state, a);

        let buttons = taskbar_buttons(&state);
        assert_eq!(buttons.len(), 2);
        assert!(buttons[0].minimized);
        assert!(!buttons[0].focused);
        assert_eq!(buttons[1].window_id, b);
        assert!(buttons[1].focused);
        assert_eq!(buttons[1].title, "Settings");
    }

    #[test]
    fn desktop_icons_fill_rows_then_wrap() {
        let entries = vec![
            FileEntry::from_key("/desktop/README.txt"),
            FileEntry::from_key("/desktop/projects/"),
            FileEntry::from_key("/desktop/image.png"),
        ];
        let icons = desktop_icons(&entries, WindowSize { w: 220, h: 600 });

        assert_eq!(desktop_icon_columns(220), 2);
        let cells = icons.iter().map(|i| (i.cell.x, i.cell.y)).collect::<Vec<_>>();
        assert_eq!(cells, vec![(16, 16), (104, 16), (16, 104)]);
        let icon_ids = icons.iter().map(|i| i.icon_id.as_str()).collect::<Vec<_>>();
        assert_eq!(icon_ids, vec!["file-text", "folder", "file"]);

        assert_eq!(icons[0].open.kind, WindowKind::TextEditor);
        assert_eq!(icons[1].open.kind, WindowKind::FileExplorer);
        assert_eq!(icons[1].open.title.as_deref(), Some("projects"));
        assert_eq!(
            icons[1].open.payload.get("path").and_then(|v| v.as_str()),
            Some("/desktop/projects/")
        );
    }

    #[test]
    fn narrow_viewport_still_has_one_column() {
        assert_eq!(desktop_icon_columns(10), 1);
    }
}
