// ============================================================================
// Rando Picker Library
// ============================================================================

pub mod config;
pub mod core;
pub mod picker;
pub mod storage;

// Re-export main types for convenience
pub use config::{PickerConfig, StorageKeys};
pub use crate::core::{EntryId, InputKind, Item, PickerError, Result, Team, TeamSummary};
pub use picker::{
    CollectionManager, Picker, Snapshot, SnapshotPersistence, SnapshotSubscriber, SubscriptionId,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistedState};

/// Open a picker whose state lives in `dir`, one JSON file per storage key.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let mut picker = rando_picker::open_dir(dir.path(), rando_picker::PickerConfig::default())?;
///
/// picker.add_item("Pizza")?;
/// picker.add_item("Sushi")?;
///
/// let picked = picker.pick_random()?;
/// println!("Random pick: {}", picked.text);
/// # Ok(())
/// # }
/// ```
pub fn open_dir<P: AsRef<std::path::Path>>(dir: P, config: PickerConfig) -> Result<Picker> {
    let store = FileStore::open(dir)?;
    Ok(Picker::open(std::sync::Arc::new(store), config))
}
