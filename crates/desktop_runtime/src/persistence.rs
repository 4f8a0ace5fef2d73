//! Desktop layout persistence through the host key-value substrate.

use platform_host::{load_json_with, save_json_with, KeyValueStore};

use crate::model::{DesktopSnapshot, DesktopState, DESKTOP_LAYOUT_SCHEMA_VERSION};

/// Substrate key holding the JSON layout snapshot.
pub const LAYOUT_SNAPSHOT_KEY: &str = "desktop:layout.v1";

/// Loads the persisted layout snapshot.
///
/// Missing, unreadable, and other-schema snapshots all yield `None`; read failures are logged.
pub async fn load_layout_snapshot(store: &dyn KeyValueStore) -> Option<DesktopSnapshot> {
    match load_json_with::<_, DesktopSnapshot>(store, LAYOUT_SNAPSHOT_KEY).await {
        Ok(Some(snapshot)) if snapshot.schema_version == DESKTOP_LAYOUT_SCHEMA_VERSION => {
            Some(snapshot)
        }
        Ok(Some(snapshot)) => {
            log::warn!(
                "ignoring layout snapshot with schema version {}",
                snapshot.schema_version
            );
            None
        }
        Ok(None) => None,
        Err(err) => {
            log::warn!("layout snapshot load failed: {err}");
            None
        }
    }
}

/// Persists the current window layout.
///
/// # Errors
///
/// Returns the substrate or serialization error text.
pub async fn persist_layout_snapshot(
    store: &dyn KeyValueStore,
    state: &DesktopState,
) -> Result<(), String> {
    save_json_with(store, LAYOUT_SNAPSHOT_KEY, &state.snapshot()).await
}
