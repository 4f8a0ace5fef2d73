//! Synthetic process table: one entry per open window plus any shell-spawned entries.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::model::{DesktopState, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessStatus {
    Running,
    /// Backing window is minimized.
    Sleeping,
}

impl ProcessStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Sleeping => "sleeping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: Pid,
    pub name: String,
    pub status: ProcessStatus,
    pub window_id: Option<WindowId>,
}

#[derive(Debug)]
struct ProcessTableInner {
    next_pid: u32,
    procs: BTreeMap<Pid, ProcessInfo>,
}

impl Default for ProcessTableInner {
    fn default() -> Self {
        Self {
            next_pid: 1,
            procs: BTreeMap::new(),
        }
    }
}

/// Shared handle; clones see the same table.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    inner: Rc<RefCell<ProcessTableInner>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a running process and returns its pid. Pids are never reused.
    pub fn spawn(&self, name: &str, window_id: Option<WindowId>) -> Pid {
        let mut inner = self.inner.borrow_mut();
        let pid = Pid(inner.next_pid);
        inner.next_pid = inner.next_pid.saturating_add(1);
        inner.procs.insert(
            pid,
            ProcessInfo {
                pid,
                name: name.to_string(),
                status: ProcessStatus::Running,
                window_id,
            },
        );
        log::debug!("spawned process {pid} ({name})");
        pid
    }

    /// Removes `pid`, returning what it was.
    pub fn kill(&self, pid: Pid) -> Option<ProcessInfo> {
        let removed = self.inner.borrow_mut().procs.remove(&pid);
        if removed.is_some() {
            log::debug!("killed process {pid}");
        }
        removed
    }

    /// Removes the process bound to `window_id`.
    pub fn kill_window(&self, window_id: WindowId) -> Option<ProcessInfo> {
        let pid = self.pid_for_window(window_id)?;
        self.kill(pid)
    }

    pub fn pid_for_window(&self, window_id: WindowId) -> Option<Pid> {
        self.inner
            .borrow()
            .procs
            .values()
            .find(|p| p.window_id == Some(window_id))
            .map(|p| p.pid)
    }

    pub fn get(&self, pid: Pid) -> Option<ProcessInfo> {
        self.inner.borrow().procs.get(&pid).cloned()
    }

    /// Every process, ascending pid.
    pub fn list(&self) -> Vec<ProcessInfo> {
        self.inner.borrow().procs.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().procs.is_empty()
    }

    /// Mirrors window state into process status: minimized windows sleep.
    pub fn sync_window_states(&self, state: &DesktopState) {
        let mut inner = self.inner.borrow_mut();
        for info in inner.procs.values_mut() {
            let Some(window) = info.window_id.and_then(|id| state.window(id)) else {
                continue;
            };
            info.status = if window.is_minimized() {
                ProcessStatus::Sleeping
            } else {
                ProcessStatus::Running
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::WindowConfig,
        model::{OpenWindowRequest, WindowKind},
        window_manager,
    };

    #[test]
    fn pids_start_at_one_and_are_not_reused() {
        let table = ProcessTable::new();
        let first = table.spawn("terminal", None);
        let second = table.spawn("editor", None);
        assert_eq!((first, second), (Pid(1), Pid(2)));

        assert!(table.kill(first).is_some());
        assert!(table.kill(first).is_none());
        assert_eq!(table.spawn("explorer", None), Pid(3));
        assert_eq!(
            table.list().iter().map(|p| p.pid).collect::<Vec<_>>(),
            vec![Pid(2), Pid(3)]
        );
    }

    #[test]
    fn clones_share_state() {
        let table = ProcessTable::new();
        let view = table.clone();
        table.spawn("terminal", Some(WindowId(4)));

        assert_eq!(view.len(), 1);
        assert_eq!(view.pid_for_window(WindowId(4)), Some(Pid(1)));
        assert_eq!(view.kill_window(WindowId(4)).map(|p| p.name), Some("terminal".to_string()));
        assert!(table.is_empty());
    }

    #[test]
    fn sync_marks_minimized_windows_sleeping() {
        let mut state = DesktopState::default();
        let id = window_manager::open_window(
            &mut state,
            &WindowConfig::default(),
            OpenWindowRequest::new(WindowKind::Terminal),
        );
        let table = ProcessTable::new();
        let pid = table.spawn("terminal", Some(id));
        let detached = table.spawn("daemon", None);

        window_manager::minimize_window(&mut state, id);
        table.sync_window_states(&state);
        assert_eq!(table.get(pid).map(|p| p.status), Some(ProcessStatus::Sleeping));
        assert_eq!(table.get(detached).map(|p| p.status), Some(ProcessStatus::Running));

        window_manager::restore_window(&mut state, id);
        table.sync_window_states(&state);
        assert_eq!(
            table.get(pid).map(|p| p.status.label()),
            Some("running")
        );
    }
}
