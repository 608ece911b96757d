//! Mirrors picker snapshots into a key-value store.

use super::{Snapshot, SnapshotSubscriber};
use crate::config::{PickerConfig, StorageKeys};
use crate::core::{EntryId, Item, Result, Team};
use crate::storage::{KeyValueStore, PersistedState};
use im::Vector;
use std::sync::Arc;
use tracing::{info, warn};

/// Persistence subscriber: writes the team list and the active id on every
/// published snapshot.
pub struct SnapshotPersistence {
    teams: PersistedState<Vector<Team>>,
    active_team_id: PersistedState<Option<EntryId>>,
    /// Legacy item list imported on load, removed once the teams are stored.
    legacy: Option<PersistedState<Vector<Item>>>,
}

impl SnapshotPersistence {
    /// Open both keys and build the snapshot they describe.
    ///
    /// Nothing stored yields a single default team, seeded from the legacy
    /// flat item list when one exists. A dangling active id is repaired.
    /// Loading never writes to the store.
    pub fn load(store: Arc<dyn KeyValueStore>, config: &PickerConfig) -> (Self, Snapshot) {
        let keys = &config.storage_keys;
        let teams = PersistedState::open(store.clone(), &keys.teams, Vector::new());
        let active_team_id = PersistedState::open(store.clone(), &keys.active_team_id, None);

        let mut legacy = None;
        let snapshot = if teams.get().is_empty() {
            let stored = open_legacy_items(store, keys);
            let items = stored.get().clone();
            if !items.is_empty() {
                legacy = Some(stored);
            }
            Snapshot::with_default_team(&config.default_team_name, items)
        } else {
            Snapshot::new(teams.get().clone(), active_team_id.get().clone())
        };

        (
            Self {
                teams,
                active_team_id,
                legacy,
            },
            snapshot,
        )
    }

    /// True when the store already reflects `snapshot`.
    pub fn is_in_sync(&self, snapshot: &Snapshot) -> bool {
        self.teams.get() == snapshot.teams()
            && self.active_team_id.get().as_ref() == snapshot.active_team_id()
    }

    /// True while imported legacy items are still kept under their old key.
    pub fn has_pending_legacy(&self) -> bool {
        self.legacy.is_some()
    }

    /// Write `snapshot`, logging failures.
    pub fn write(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.try_write(snapshot) {
            warn!(error = %err, "failed to write snapshot");
        }
    }

    /// Write `snapshot` and report the first failure.
    ///
    /// The legacy key is removed only after the team list was stored, so a
    /// failed write leaves the imported items recoverable.
    pub fn try_write(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.teams.try_set(snapshot.teams().clone())?;
        self.retire_legacy()?;
        self.active_team_id.try_set(snapshot.active_team_id().cloned())
    }

    fn retire_legacy(&mut self) -> Result<()> {
        let Some(mut legacy) = self.legacy.take() else {
            return Ok(());
        };
        // Empty sequence removes the key.
        if let Err(err) = legacy.try_set(Vector::new()) {
            self.legacy = Some(legacy);
            return Err(err);
        }
        info!("legacy items stored in default team, old key removed");
        Ok(())
    }
}

impl SnapshotSubscriber for SnapshotPersistence {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.write(snapshot);
    }
}

/// Items from the flat single-list key.
fn open_legacy_items(
    store: Arc<dyn KeyValueStore>,
    keys: &StorageKeys,
) -> PersistedState<Vector<Item>> {
    let legacy = PersistedState::open(store, &keys.legacy_items, Vector::<Item>::new());
    if !legacy.get().is_empty() {
        info!(count = legacy.get().len(), key = %keys.legacy_items, "importing legacy items into default team");
    }
    legacy
}
