pub mod collection;
pub mod persistence;
pub mod selector;
pub mod snapshot;
pub mod state;

pub use collection::{CollectionManager, validate_input};
pub use persistence::SnapshotPersistence;
pub use snapshot::Snapshot;
pub use state::{Picker, SnapshotSubscriber, SubscriptionId};
