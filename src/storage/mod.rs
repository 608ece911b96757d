pub mod engine;
pub mod file;
pub mod memory;
pub mod persisted;

pub use engine::KeyValueStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persisted::PersistedState;
