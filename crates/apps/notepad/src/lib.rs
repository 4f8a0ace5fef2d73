//! Headless text-editor session bound to one virtual file path.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use platform_host::{FsError, VirtualFileStore};
use serde::{Deserialize, Serialize};

/// Status shown in the editor status bar after the last load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotepadStatus {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// Content was read from the store.
    Loaded,
    /// The path does not exist yet; saving will create it.
    NewFile,
    /// The last save succeeded.
    Saved,
    /// Save was requested without a path.
    NoFilePath,
    /// The last save failed.
    SaveFailed,
}

impl NotepadStatus {
    /// Status-bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Loaded => "Loaded",
            Self::NewFile => "New file",
            Self::Saved => "Saved!",
            Self::NoFilePath => "No file path",
            Self::SaveFailed => "Save failed",
        }
    }
}

/// Editor buffer state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotepadSession {
    path: Option<String>,
    text: String,
    dirty: bool,
    status: NotepadStatus,
}

impl NotepadSession {
    /// Creates an empty session, optionally bound to `path`.
    pub fn new(path: Option<String>) -> Self {
        Self {
            path: path.filter(|path| !path.trim().is_empty()),
            ..Self::default()
        }
    }

    /// Bound path.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the buffer differs from the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last load/save status.
    pub fn status(&self) -> NotepadStatus {
        self.status
    }

    /// Whether the save control is enabled.
    pub fn can_save(&self) -> bool {
        self.path.is_some()
    }

    /// Window title: the file name (or `Untitled`) with a `*` marker while dirty.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
            .unwrap_or("Untitled");
        if self.dirty {
            format!("{name}*")
        } else {
            name.to_string()
        }
    }

    /// Rebinds the session to another path. The buffer is kept and marked dirty.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
        self.dirty = true;
    }

    /// Replaces the buffer text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    /// Loads the bound file. A missing file starts an empty buffer with [`NotepadStatus::NewFile`].
    pub async fn load(&mut self, fs: &VirtualFileStore) -> NotepadStatus {
        let Some(path) = self.path.clone() else {
            return self.status;
        };
        match fs.read(&path).await {
            Ok(text) => {
                self.text = text;
                self.status = NotepadStatus::Loaded;
            }
            Err(FsError::NotFound(_)) => {
                self.text.clear();
                self.status = NotepadStatus::NewFile;
            }
            Err(err) => {
                log::warn!("editor failed to load {path}: {err}");
                self.text.clear();
                self.status = NotepadStatus::NewFile;
            }
        }
        self.dirty = false;
        self.status
    }

    /// Writes the buffer to the bound path.
    pub async fn save(&mut self, fs: &VirtualFileStore) -> NotepadStatus {
        let Some(path) = self.path.clone() else {
            self.status = NotepadStatus::NoFilePath;
            return self.status;
        };
        self.status = match fs.write(&path, &self.text).await {
            Ok(()) => {
                self.dirty = false;
                NotepadStatus::Saved
            }
            Err(err) => {
                log::warn!("editor failed to save {path}: {err}");
                NotepadStatus::SaveFailed
            }
        };
        self.status
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use platform_host::{KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn memory_fs() -> VirtualFileStore {
        VirtualFileStore::new(Rc::new(MemoryKeyValueStore::new()))
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get<'a>(
            &'a self,
            _key: &'a str,
        ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
            Box::pin(async { Ok(None) })
        }

        fn set<'a>(
            &'a self,
            _key: &'a str,
            _value: &'a str,
        ) -> KeyValueStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("read-only".to_string()) })
        }

        fn remove<'a>(&'a self, _key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }

        fn keys<'a>(&'a self) -> KeyValueStoreFuture<'a, Result<Vec<String>, String>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[test]
    fn load_reports_loaded_or_new_file() {
        let fs = memory_fs();
        block_on(fs.write("/desktop/notes.txt", "hello")).expect("write");

        let mut existing = NotepadSession::new(Some("/desktop/notes.txt".to_string()));
        assert_eq!(block_on(existing.load(&fs)), NotepadStatus::Loaded);
        assert_eq!(existing.text(), "hello");
        assert!(!existing.is_dirty());

        let mut fresh = NotepadSession::new(Some("/desktop/new.txt".to_string()));
        assert_eq!(block_on(fresh.load(&fs)), NotepadStatus::NewFile);
        assert_eq!(fresh.status().label(), "New file");
    }

    #[test]
    fn edit_then_save_persists_and_clears_dirty() {
        let fs = memory_fs();
        let mut session = NotepadSession::new(Some("/documents/todo.txt".to_string()));
        block_on(session.load(&fs));

        session.set_text("buy milk");
        assert!(session.is_dirty());
        assert_eq!(session.title(), "todo.txt*");

        assert_eq!(block_on(session.save(&fs)), NotepadStatus::Saved);
        assert_eq!(session.status().label(), "Saved!");
        assert!(!session.is_dirty());
        assert_eq!(
            block_on(fs.read("/documents/todo.txt")).expect("read"),
            "buy milk"
        );
    }

    #[test]
    fn save_without_path_is_rejected() {
        let fs = memory_fs();
        let mut session = NotepadSession::new(None);
        session.set_text("draft");

        assert!(!session.can_save());
        assert_eq!(block_on(session.save(&fs)), NotepadStatus::NoFilePath);
        assert_eq!(session.title(), "Untitled*");
    }

    #[test]
    fn substrate_write_failure_reports_save_failed() {
        let fs = VirtualFileStore::new(Rc::new(ReadOnlyStore));
        let mut session = NotepadSession::new(Some("/a.txt".to_string()));
        session.set_text("x");

        assert_eq!(block_on(session.save(&fs)), NotepadStatus::SaveFailed);
        assert!(session.is_dirty());
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&NotepadStatus::NoFilePath).expect("serialize"),
            "\"no-file-path\""
        );
    }
}
