pub mod browse;
pub mod cache;
pub mod config;
pub mod forms;
pub mod hints;
pub mod models;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

#[cfg(test)]
pub(crate) mod fixtures;

pub use browse::{FamilyGroup, ListState};
pub use cache::{CacheHandle, CachePolicy, QueryCache, QueryKey, Snapshot};
pub use config::{ClientConfig, ConfigError};
pub use forms::FieldErrors;
pub use hints::{HintStore, UiHints};
pub use models::{Allotment, UserProfile, Variety, VarietyOptions};
