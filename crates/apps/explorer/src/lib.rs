//! Headless file-explorer session over the virtual file store.
//!
//! The session tracks the current directory and the entries listed under it. Activating an
//! entry either navigates (directories) or asks the host to open the file in an editor.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use platform_host::{
    directory_prefix, normalize_virtual_path, parent_virtual_path, FileEntry, VirtualFileStore,
};
use serde::{Deserialize, Serialize};

/// What the host should do after an entry is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExplorerAction {
    /// Navigate the session to a directory.
    Navigate {
        /// Directory path.
        path: String,
    },
    /// Open a file in the text editor.
    OpenFile {
        /// Display name used as the editor title.
        name: String,
        /// File path.
        path: String,
    },
}

/// Current explorer directory and its listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerSession {
    path: String,
    entries: Vec<FileEntry>,
    selected: Option<usize>,
}

fn as_directory(path: &str) -> String {
    directory_prefix(&normalize_virtual_path(path))
}

impl ExplorerSession {
    /// Creates a session positioned at `path` with no entries loaded yet.
    pub fn new(path: &str) -> Self {
        Self {
            path: as_directory(path),
            entries: Vec::new(),
            selected: None,
        }
    }

    /// Current directory, always ending in `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries listed under the current directory.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Whether the go-up control is enabled.
    pub fn can_go_up(&self) -> bool {
        self.path != "/"
    }

    /// Selected entry, if any.
    pub fn selected(&self) -> Option<&FileEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    /// Selects the entry at `index`; out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        self.selected = (index < self.entries.len()).then_some(index);
    }

    /// Status-bar text.
    pub fn status_text(&self) -> String {
        format!("{} item(s)", self.entries.len())
    }

    /// Moves to `path` and reloads its entries. Listing failures leave the listing empty.
    pub async fn navigate(&mut self, fs: &VirtualFileStore, path: &str) {
        self.path = as_directory(path);
        self.refresh(fs).await;
    }

    /// Moves to the parent directory. No-op at the root.
    pub async fn go_up(&mut self, fs: &VirtualFileStore) {
        if !self.can_go_up() {
            return;
        }
        let parent = parent_virtual_path(&self.path);
        self.navigate(fs, &parent).await;
    }

    /// Reloads entries for the current directory.
    pub async fn refresh(&mut self, fs: &VirtualFileStore) {
        self.selected = None;
        self.entries = match fs.entries(&self.path).await {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("explorer listing for {} failed: {err}", self.path);
                Vec::new()
            }
        };
    }

    /// Maps an activated entry to the follow-up action.
    pub fn activate(&self, entry: &FileEntry) -> ExplorerAction {
        if entry.is_directory() {
            ExplorerAction::Navigate {
                path: entry.path.clone(),
            }
        } else {
            ExplorerAction::OpenFile {
                name: entry.name.clone(),
                path: entry.path.clone(),
            }
        }
    }
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use platform_host::{FileEntryKind, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn seeded_fs() -> VirtualFileStore {
        let fs = VirtualFileStore::new(Rc::new(MemoryKeyValueStore::new()));
        block_on(fs.write("/desktop/notes.txt", "n")).expect("write");
        block_on(fs.write("/desktop/projects/", "")).expect("write");
        block_on(fs.write("/desktop/projects/plan.txt", "p")).expect("write");
        fs
    }

    #[test]
    fn navigate_lists_entries_under_directory() {
        let fs = seeded_fs();
        let mut session = ExplorerSession::new("/desktop");
        block_on(session.refresh(&fs));

        assert_eq!(session.path(), "/desktop/");
        assert_eq!(session.entries().len(), 3);
        assert_eq!(session.status_text(), "3 item(s)");

        block_on(session.navigate(&fs, "/desktop/projects/"));
        let names = session
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["projects", "plan.txt"]);
    }

    #[test]
    fn go_up_stops_at_root() {
        let fs = seeded_fs();
        let mut session = ExplorerSession::new("/desktop/projects/");

        block_on(session.go_up(&fs));
        assert_eq!(session.path(), "/desktop/");
        block_on(session.go_up(&fs));
        assert_eq!(session.path(), "/");
        assert!(!session.can_go_up());
        block_on(session.go_up(&fs));
        assert_eq!(session.path(), "/");
    }

    #[test]
    fn activate_routes_directories_and_files() {
        let session = ExplorerSession::default();
        let dir = FileEntry::from_key("/desktop/projects/");
        let file = FileEntry::from_key("/desktop/notes.txt");

        assert_eq!(
            session.activate(&dir),
            ExplorerAction::Navigate {
                path: "/desktop/projects/".to_string()
            }
        );
        assert_eq!(
            session.activate(&file),
            ExplorerAction::OpenFile {
                name: "notes.txt".to_string(),
                path: "/desktop/notes.txt".to_string()
            }
        );
        assert_eq!(file.kind, FileEntryKind::File);
    }

    #[test]
    fn selection_resets_on_refresh() {
        let fs = seeded_fs();
        let mut session = ExplorerSession::new("/desktop/");
        block_on(session.refresh(&fs));

        session.select(1);
        assert!(session.selected().is_some());
        session.select(99);
        assert!(session.selected().is_none());

        session.select(0);
        block_on(session.refresh(&fs));
        assert!(session.selected().is_none());
    }

    #[test]
    fn action_serializes_with_kind_tag() {
        let json = serde_json::to_value(ExplorerAction::Navigate {
            path: "/a/".to_string(),
        })
        .expect("serialize");
        assert_eq!(json["kind"], "navigate");
    }
}
