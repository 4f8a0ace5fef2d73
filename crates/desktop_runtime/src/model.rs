use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_FIRST_Z_INDEX: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    Terminal,
    FileExplorer,
    TextEditor,
    Settings,
}

impl WindowKind {
    pub const ALL: [Self; 4] = [
        Self::Terminal,
        Self::FileExplorer,
        Self::TextEditor,
        Self::Settings,
    ];

    pub fn canonical_id(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::FileExplorer => "file-explorer",
            Self::TextEditor => "text-editor",
            Self::Settings => "settings",
        }
    }

    pub fn from_canonical_id(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.canonical_id() == raw)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::FileExplorer => "Files",
            Self::TextEditor => "Editor",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::FileExplorer => "folder",
            Self::TextEditor => "file-text",
            Self::Settings => "settings",
        }
    }

    /// Name shown for the synthetic process backing a window of this kind.
    pub fn process_name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::FileExplorer => "explorer",
            Self::TextEditor => "editor",
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            w: self.w.max(min.w),
            h: self.h.max(min.h),
            ..self
        }
    }

    pub fn size(self) -> WindowSize {
        WindowSize {
            w: self.w,
            h: self.h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            w: self.w.max(min.w),
            h: self.h.max(min.h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFlags {
    pub resizable: bool,
    pub draggable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            resizable: true,
            draggable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    pub icon_id: String,
    /// Stored geometry. Kept while maximized so restore can return to it.
    pub rect: WindowRect,
    pub min_size: WindowSize,
    pub state: WindowState,
    pub z_index: u64,
    pub flags: WindowFlags,
    pub payload: Map<String, Value>,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    /// `path` payload entry, used by explorer and editor windows.
    pub fn payload_path(&self) -> Option<&str> {
        self.payload.get("path").and_then(Value::as_str)
    }
}

/// Explicit container for every open window plus the id/z counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Open windows in open order.
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
    pub next_window_id: u64,
    pub next_z_index: u64,
    pub viewport: WindowSize,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_Z_INDEX, WindowSize { w: 1280, h: 800 })
    }
}

impl DesktopState {
    pub fn new(first_z_index: u64, viewport: WindowSize) -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            next_window_id: 1,
            next_z_index: first_z_index,
            viewport,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            windows: self.windows.clone(),
            focused: self.focused,
        }
    }

    /// Rebuilds state from a snapshot. Counters resume above every restored id and z-index so
    /// neither is ever reused.
    pub fn from_snapshot(
        snapshot: DesktopSnapshot,
        first_z_index: u64,
        viewport: WindowSize,
    ) -> Self {
        let mut state = Self::new(first_z_index, viewport);
        state.next_window_id = snapshot
            .windows
            .iter()
            .map(|w| w.id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        state.next_z_index = snapshot
            .windows
            .iter()
            .map(|w| w.z_index.saturating_add(1))
            .max()
            .unwrap_or(first_z_index)
            .max(first_z_index);
        state.focused = snapshot
            .focused
            .filter(|id| snapshot.windows.iter().any(|w| w.id == *id));
        state.windows = snapshot.windows;
        state
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub kind: WindowKind,
    pub title: Option<String>,
    pub icon_id: Option<String>,
    /// Explicit geometry; cascade placement and default size apply when absent.
    pub rect: Option<WindowRect>,
    pub min_size: Option<WindowSize>,
    pub flags: WindowFlags,
    pub payload: Map<String, Value>,
}

impl OpenWindowRequest {
    pub fn new(kind: WindowKind) -> Self {
        Self {
            kind,
            title: None,
            icon_id: None,
            rect: None,
            min_size: None,
            flags: WindowFlags::default(),
            payload: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_rect(mut self, rect: WindowRect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn with_min_size(mut self, min_size: WindowSize) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.payload
            .insert("path".to_string(), Value::String(path.into()));
        self
    }
}
