//! File store data types shared across host contracts and apps.

use serde::{Deserialize, Serialize};

/// Substrate key prefix under which every virtual file is stored.
pub const FS_KEY_PREFIX: &str = "fs:";
/// Substrate key whose presence marks the store as already seeded.
pub const FS_INITIALIZED_KEY: &str = "fs:__initialized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// File store entry kind.
pub enum FileEntryKind {
    /// File entry.
    File,
    /// Directory entry (a key ending in `/`).
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Entry derived from a stored key. Never persisted on its own.
pub struct FileEntry {
    /// Last non-empty path segment.
    pub name: String,
    /// Raw stored path.
    pub path: String,
    /// File or directory kind.
    pub kind: FileEntryKind,
}

impl FileEntry {
    /// Parses a stored path into an entry.
    ///
    /// Directory-ness is purely a naming convention: keys ending in `/` are directories.
    pub fn from_key(path: &str) -> Self {
        let name = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .unwrap_or(path)
            .to_string();
        let kind = if path.ends_with('/') {
            FileEntryKind::Directory
        } else {
            FileEntryKind::File
        };
        Self {
            name,
            path: path.to_string(),
            kind,
        }
    }

    /// Returns `true` for directory entries.
    pub fn is_directory(&self) -> bool {
        self.kind == FileEntryKind::Directory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// How `list` interprets its path argument.
pub enum ListingMode {
    /// Plain string-prefix match: `/doc` also matches `/document/...`.
    #[default]
    Prefix,
    /// Directory match: a missing trailing `/` is appended before matching.
    Directory,
}

/// One file written when a store is seeded for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedFile {
    /// Absolute virtual path.
    pub path: &'static str,
    /// Initial text content.
    pub content: &'static str,
}

/// Files written on first run, across the two conventional directories.
pub const DEFAULT_SEED_FILES: [SeedFile; 3] = [
    SeedFile {
        path: "/desktop/README.txt",
        content: "Welcome to the desktop!\n\n\
This desktop runs entirely on the client.\n\n\
Features:\n\
- Draggable, resizable windows\n\
- Terminal with command support\n\
- File Explorer\n\
- Text Editor\n\n\
Right-click on the desktop for more options.",
    },
    SeedFile {
        path: "/desktop/notes.txt",
        content: "My Notes\n=========\n\nEdit this file to add your own notes.\n",
    },
    SeedFile {
        path: "/documents/example.txt",
        content: "This is an example document.\n\n\
You can create, edit, and save files using the Text Editor.",
    },
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_entry_parses_files_and_directories() {
        assert_eq!(
            FileEntry::from_key("/desktop/README.txt"),
            FileEntry {
                name: "README.txt".to_string(),
                path: "/desktop/README.txt".to_string(),
                kind: FileEntryKind::File,
            }
        );

        let dir = FileEntry::from_key("/documents/projects/");
        assert_eq!(dir.name, "projects");
        assert!(dir.is_directory());
    }

    #[test]
    fn file_entry_falls_back_to_raw_key_without_segments() {
        let root = FileEntry::from_key("/");
        assert_eq!(root.name, "/");
        assert!(root.is_directory());
    }

    #[test]
    fn listing_mode_serde_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ListingMode::Directory).expect("serialize"),
            "\"directory\""
        );
        let mode: ListingMode = serde_json::from_str("\"prefix\"").expect("deserialize");
        assert_eq!(mode, ListingMode::Prefix);
    }

    #[test]
    fn seed_files_live_in_two_directories() {
        let mut dirs = DEFAULT_SEED_FILES
            .iter()
            .map(|seed| seed.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(""))
            .collect::<Vec<_>>();
        dirs.sort_unstable();
        dirs.dedup();
        assert_eq!(dirs, vec!["/desktop", "/documents"]);
    }
}
