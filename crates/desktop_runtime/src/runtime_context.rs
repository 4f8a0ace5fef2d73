//! Shared runtime handle: window manager, file store, process table and substrate.
//!
//! Command handlers hold a clone of [`RuntimeContext`]. It must not own the interpreter: the
//! interpreter's registry stores those handlers.

use std::{cell::RefCell, fmt, rc::Rc};

use platform_host::{KeyValueStore, VirtualFileStore};

use crate::{
    config::DesktopConfig,
    model::{DesktopState, WindowRecord},
    persistence,
    processes::ProcessTable,
    reducer::{DesktopAction, RuntimeEffect},
    window_manager::WindowManager,
};

/// Cheap-to-clone handle over the long-lived runtime services.
#[derive(Clone)]
pub struct RuntimeContext {
    config: Rc<DesktopConfig>,
    manager: Rc<RefCell<WindowManager>>,
    fs: VirtualFileStore,
    substrate: Rc<dyn KeyValueStore>,
    processes: ProcessTable,
}

impl fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("config", &self.config)
            .field("manager", &self.manager)
            .field("fs", &self.fs)
            .field("processes", &self.processes)
            .finish_non_exhaustive()
    }
}

impl RuntimeContext {
    pub fn new(config: DesktopConfig, substrate: Rc<dyn KeyValueStore>) -> Self {
        let fs = VirtualFileStore::with_listing_mode(substrate.clone(), config.fs.listing);
        let manager = WindowManager::new(config.clone());
        Self {
            config: Rc::new(config),
            manager: Rc::new(RefCell::new(manager)),
            fs,
            substrate,
            processes: ProcessTable::new(),
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn fs(&self) -> &VirtualFileStore {
        &self.fs
    }

    pub fn substrate(&self) -> &dyn KeyValueStore {
        self.substrate.as_ref()
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    /// Snapshot of the current desktop state.
    pub fn state(&self) -> DesktopState {
        self.manager.borrow().state().clone()
    }

    pub fn windows(&self) -> Vec<WindowRecord> {
        self.manager.borrow().state().windows.clone()
    }

    /// Runs `f` against the window manager without cloning state.
    pub fn with_manager<R>(&self, f: impl FnOnce(&WindowManager) -> R) -> R {
        f(&self.manager.borrow())
    }

    /// Reduces `action`, then executes its effects in order: process bookkeeping first, layout
    /// persistence last. Returns the effects for callers that need the opened window id.
    pub async fn dispatch(&self, action: DesktopAction) -> Vec<RuntimeEffect> {
        let effects = self.manager.borrow_mut().apply(action);
        let mut persist = false;
        for effect in &effects {
            match effect {
                RuntimeEffect::WindowOpened { window_id, kind } => {
                    self.processes.spawn(kind.process_name(), Some(*window_id));
                }
                RuntimeEffect::WindowClosed { window_id } => {
                    self.processes.kill_window(*window_id);
                }
                RuntimeEffect::FocusWindowInput(window_id) => {
                    log::debug!("input focus -> window {}", window_id.0);
                }
                RuntimeEffect::PersistLayout => persist = true,
            }
        }

        let state = self.state();
        self.processes.sync_window_states(&state);
        if persist && self.config.session.persist_layout {
            if let Err(err) =
                persistence::persist_layout_snapshot(self.substrate.as_ref(), &state).await
            {
                log::warn!("persist layout failed: {err}");
            }
        }
        effects
    }
}
