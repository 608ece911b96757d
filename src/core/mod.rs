pub mod error;
pub mod types;

pub use error::{InputKind, PickerError, Result};
pub use types::{EntryId, Item, Team, TeamSummary, new_id};
