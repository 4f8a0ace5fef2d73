//! Headless desktop runtime: boots the file store, restores layout, wires the shell, and exposes
//! the window manager and app sessions to hosts.

use std::rc::Rc;

use desktop_app_explorer::{ExplorerAction, ExplorerSession};
use desktop_app_notepad::NotepadSession;
use desktop_app_terminal::TerminalSession;
use platform_host::{FsError, KeyValueStore, VirtualFileStore};
use system_shell::CommandInterpreter;
use system_shell_contract::{ShellRequest, ShellResponse};
use thiserror::Error;

use crate::{
    config::{ConfigError, DesktopConfig},
    model::{DesktopState, OpenWindowRequest, WindowId, WindowKind, WindowRecord, WindowRect},
    persistence,
    processes::ProcessTable,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::RuntimeContext,
    shell,
    views::{self, DesktopIcon, TaskbarButton},
};

/// Boot failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Seeding the file store failed.
    #[error("file store seeding failed: {0}")]
    Fs(#[from] FsError),
}

/// A booted desktop: window manager, file store, process table and command interpreter.
pub struct DesktopRuntime {
    context: RuntimeContext,
    shell: CommandInterpreter,
}

fn opened_window_id(effects: &[RuntimeEffect]) -> Option<WindowId> {
    effects.iter().find_map(|effect| match effect {
        RuntimeEffect::WindowOpened { window_id, .. } => Some(*window_id),
        _ => None,
    })
}

impl DesktopRuntime {
    /// Boots a runtime over `substrate`.
    ///
    /// Seeds the default files on first run when enabled, restores the saved layout when enabled,
    /// then registers the built-in commands.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Config`] for an invalid config and [`RuntimeError::Fs`] when the
    /// substrate rejects the seed writes.
    pub async fn boot(
        config: DesktopConfig,
        substrate: Rc<dyn KeyValueStore>,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        let context = RuntimeContext::new(config, substrate);

        if context.config().fs.seed_defaults && context.fs().seed_defaults().await? {
            log::info!("seeded default files");
        }

        if context.config().session.restore_layout {
            if let Some(snapshot) = persistence::load_layout_snapshot(context.substrate()).await {
                context
                    .dispatch(DesktopAction::HydrateSnapshot { snapshot })
                    .await;
                log::info!("restored {} window(s)", context.windows().len());
            }
        }

        let shell = CommandInterpreter::new();
        shell::register_builtin_commands(&shell, context.clone());
        log::info!(
            "desktop runtime booted with {} commands",
            shell.descriptors().len()
        );
        Ok(Self { context, shell })
    }

    /// Boots over the substrate chosen by `platform_host_web` for this build.
    ///
    /// # Errors
    ///
    /// As [`Self::boot`].
    pub async fn boot_with_host(config: DesktopConfig) -> Result<Self, RuntimeError> {
        log::info!(
            "using {} host substrate",
            platform_host_web::host_strategy_name()
        );
        Self::boot(config, Rc::new(platform_host_web::key_value_store())).await
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }

    pub fn config(&self) -> &DesktopConfig {
        self.context.config()
    }

    pub fn fs(&self) -> &VirtualFileStore {
        self.context.fs()
    }

    pub fn processes(&self) -> &ProcessTable {
        self.context.processes()
    }

    pub fn shell(&self) -> &CommandInterpreter {
        &self.shell
    }

    pub fn state(&self) -> DesktopState {
        self.context.state()
    }

    pub fn windows(&self) -> Vec<WindowRecord> {
        self.context.windows()
    }

    /// Runs one command line and returns its text.
    pub async fn execute(&self, line: &str) -> String {
        self.shell.execute(line).await
    }

    pub async fn execute_request(&self, request: ShellRequest) -> ShellResponse {
        self.shell.execute_request(request).await
    }

    pub async fn dispatch(&self, action: DesktopAction) -> Vec<RuntimeEffect> {
        self.context.dispatch(action).await
    }

    /// Opens a window and returns its id.
    pub async fn open_window(&self, request: OpenWindowRequest) -> Option<WindowId> {
        let effects = self.dispatch(DesktopAction::OpenWindow(request)).await;
        opened_window_id(&effects)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.context.with_manager(|wm| wm.focused_window_id())
    }

    pub fn topmost_window_id(&self) -> Option<WindowId> {
        self.context.with_manager(|wm| wm.topmost_window_id())
    }

    /// Non-minimized windows, back to front.
    pub fn compositor_stack(&self) -> Vec<WindowRecord> {
        self.context
            .with_manager(|wm| wm.compositor_stack().into_iter().cloned().collect())
    }

    pub fn taskbar(&self) -> Vec<TaskbarButton> {
        self.context
            .with_manager(|wm| views::taskbar_buttons(wm.state()))
    }

    pub fn effective_rect(&self, window_id: WindowId) -> Option<WindowRect> {
        self.context.with_manager(|wm| wm.effective_rect(window_id))
    }

    /// Icons for the configured desktop directory. Listing failures yield no icons.
    pub async fn desktop_icons(&self) -> Vec<DesktopIcon> {
        let dir = self.config().desktop.desktop_dir.clone();
        let entries = match self.fs().entries(&dir).await {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("desktop listing for {dir} failed: {err}");
                Vec::new()
            }
        };
        views::desktop_icons(&entries, self.state().viewport)
    }

    pub async fn activate_desktop_icon(&self, icon: &DesktopIcon) -> Option<WindowId> {
        self.open_window(icon.open.clone()).await
    }

    /// Fresh terminal transcript bound to `window_id`.
    pub fn terminal_session(&self, window_id: Option<WindowId>) -> TerminalSession {
        TerminalSession::new(window_id.map(|id| id.0))
    }

    /// Explorer session positioned at the window's `path` payload (or `/`) with entries loaded.
    pub async fn explorer_session(&self, window_id: WindowId) -> ExplorerSession {
        let path = self.payload_path(window_id).unwrap_or_else(|| "/".to_string());
        let mut session = ExplorerSession::new(&path);
        session.refresh(self.fs()).await;
        session
    }

    /// Editor session for the window's `path` payload, loaded from the store.
    pub async fn notepad_session(&self, window_id: WindowId) -> NotepadSession {
        let mut session = NotepadSession::new(self.payload_path(window_id));
        session.load(self.fs()).await;
        session
    }

    /// Carries out an explorer activation: directories navigate `session`, files open an editor
    /// window whose id is returned.
    pub async fn apply_explorer_action(
        &self,
        session: &mut ExplorerSession,
        action: ExplorerAction,
    ) -> Option<WindowId> {
        match action {
            ExplorerAction::Navigate { path } => {
                session.navigate(self.fs(), &path).await;
                None
            }
            ExplorerAction::OpenFile { name, path } => {
                self.open_window(
                    OpenWindowRequest::new(WindowKind::TextEditor)
                        .with_title(name)
                        .with_path(path),
                )
                .await
            }
        }
    }

    fn payload_path(&self, window_id: WindowId) -> Option<String> {
        self.context.with_manager(|wm| {
            wm.window(window_id)
                .and_then(|w| w.payload_path())
                .map(str::to_string)
        })
    }
}
