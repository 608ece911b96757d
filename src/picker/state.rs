use super::persistence::SnapshotPersistence;
use super::{CollectionManager, Snapshot, selector};
use crate::config::PickerConfig;
use crate::core::{Item, PickerError, Result, TeamSummary};
use crate::storage::KeyValueStore;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// Receives every snapshot the picker publishes.
pub trait SnapshotSubscriber {
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

impl<F> SnapshotSubscriber for F
where
    F: FnMut(&Snapshot),
{
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Handle returned by [`Picker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the current snapshot.
///
/// Mutations go through the [`CollectionManager`], the result is published,
/// and subscribers are notified once per change. The random selection and the
/// last validation error are transient and never reach subscribers.
pub struct Picker {
    manager: CollectionManager,
    snapshot: Snapshot,
    selection: Option<Item>,
    last_error: Option<PickerError>,
    subscribers: Vec<(SubscriptionId, Box<dyn SnapshotSubscriber>)>,
    next_subscription: u64,
}

impl Picker {
    /// In-memory picker with one empty default team and no persistence.
    pub fn new(config: PickerConfig) -> Self {
        let manager = CollectionManager::new(config);
        let snapshot = manager.initial_snapshot();
        Self::from_parts(manager, snapshot)
    }

    /// In-memory picker starting from `snapshot`.
    pub fn with_snapshot(config: PickerConfig, snapshot: Snapshot) -> Self {
        Self::from_parts(CollectionManager::new(config), snapshot.repaired())
    }

    /// Picker backed by `store`. Stored state is loaded (falling back to a
    /// default team), and every later change is written back.
    pub fn open(store: Arc<dyn KeyValueStore>, config: PickerConfig) -> Self {
        let (mut persistence, snapshot) = SnapshotPersistence::load(store, &config);
        if !persistence.is_in_sync(&snapshot) {
            persistence.write(&snapshot);
        }

        let mut picker = Self::from_parts(CollectionManager::new(config), snapshot);
        picker.subscribe(persistence);
        picker
    }

    fn from_parts(manager: CollectionManager, snapshot: Snapshot) -> Self {
        Self {
            manager,
            snapshot,
            selection: None,
            last_error: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn config(&self) -> &PickerConfig {
        self.manager.config()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn items(&self) -> im::Vector<Item> {
        self.snapshot.active_items()
    }

    pub fn teams(&self) -> Vec<TeamSummary> {
        self.snapshot.summaries()
    }

    pub fn selection(&self) -> Option<&Item> {
        self.selection.as_ref()
    }

    pub fn last_error(&self) -> Option<&PickerError> {
        self.last_error.as_ref()
    }

    /// User-facing text of the last validation error.
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|err| err.to_string())
    }

    // ========================================================================
    // Subscribers
    // ========================================================================

    pub fn subscribe<S>(&mut self, subscriber: S) -> SubscriptionId
    where
        S: SnapshotSubscriber + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Add an item to the active team and return it. `Ok(None)` when there is
    /// no active team.
    pub fn add_item(&mut self, text: &str) -> Result<Option<Item>> {
        let next = self.manager.add_item(&self.snapshot, text);
        let changed = self.commit(next)?;
        Ok(if changed {
            self.snapshot.active_items().last().cloned()
        } else {
            None
        })
    }

    pub fn remove_item(&mut self, item_id: &str) {
        let next = self.manager.remove_item(&self.snapshot, item_id);
        self.publish(next);
        self.last_error = None;
    }

    /// Empty the active team and drop the current selection.
    pub fn clear_items(&mut self) {
        let next = self.manager.clear_items(&self.snapshot);
        self.publish(next);
        self.reset_transient();
    }

    /// Single-list name for [`Picker::clear_items`].
    pub fn clear_all(&mut self) {
        self.clear_items();
    }

    // ========================================================================
    // Teams
    // ========================================================================

    pub fn add_team(&mut self, name: &str) -> Result<()> {
        let next = self.manager.add_team(&self.snapshot, name);
        self.commit(next).map(|_| ())
    }

    pub fn rename_team(&mut self, team_id: &str, new_name: &str) -> Result<()> {
        let next = self.manager.rename_team(&self.snapshot, team_id, new_name);
        self.commit(next).map(|_| ())
    }

    /// Delete a team. Losing the active team drops the selection as well.
    pub fn delete_team(&mut self, team_id: &str) -> Result<()> {
        let previous_active = self.snapshot.active_team_id().cloned();
        let next = self.manager.delete_team(&self.snapshot, team_id);
        self.commit(next)?;
        if self.snapshot.active_team_id() != previous_active.as_ref() {
            self.reset_transient();
        }
        Ok(())
    }

    /// Activate `team_id` and drop the selection; unknown ids change nothing.
    pub fn switch_active_team(&mut self, team_id: &str) {
        if self.snapshot.team(team_id).is_none() {
            return;
        }
        let next = self.manager.switch_active_team(&self.snapshot, team_id);
        self.publish(next);
        self.reset_transient();
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Pick a random item from the active team using the thread-local RNG.
    pub fn pick_random(&mut self) -> Result<Item> {
        self.pick_random_with(&mut rand::rng())
    }

    /// Pick with a caller-supplied RNG. An empty team clears the selection
    /// and reports [`PickerError::NoItemsAvailable`].
    pub fn pick_random_with<R>(&mut self, rng: &mut R) -> Result<Item>
    where
        R: Rng + ?Sized,
    {
        let items = self.snapshot.active_items();
        match selector::pick(&items, rng) {
            Ok(item) => {
                let item = item.clone();
                self.selection = Some(item.clone());
                self.last_error = None;
                Ok(item)
            }
            Err(err) => {
                self.selection = None;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Publish a successful transition or record the validation error.
    /// Returns whether the snapshot changed.
    fn commit(&mut self, next: Result<Snapshot>) -> Result<bool> {
        match next {
            Ok(snapshot) => {
                self.last_error = None;
                Ok(self.publish(snapshot))
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn publish(&mut self, next: Snapshot) -> bool {
        if next == self.snapshot {
            return false;
        }
        self.snapshot = next;
        debug!(
            teams = self.snapshot.teams().len(),
            active_items = self.snapshot.active_items().len(),
            "snapshot published"
        );
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber.on_snapshot(&self.snapshot);
        }
        true
    }

    fn reset_transient(&mut self) {
        self.selection = None;
        self.last_error = None;
    }
}
