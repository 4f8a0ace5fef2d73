pub mod config;
pub mod model;
pub mod persistence;
pub mod processes;
pub mod reducer;
pub mod runtime;
pub mod runtime_context;
pub mod shell;
pub mod views;
pub mod window_manager;

pub use config::{ConfigError, DesktopConfig};
pub use model::*;
pub use persistence::{load_layout_snapshot, persist_layout_snapshot, LAYOUT_SNAPSHOT_KEY};
pub use processes::{Pid, ProcessInfo, ProcessStatus, ProcessTable};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime::{DesktopRuntime, RuntimeError};
pub use runtime_context::RuntimeContext;
pub use views::{DesktopIcon, TaskbarButton};
pub use window_manager::WindowManager;
