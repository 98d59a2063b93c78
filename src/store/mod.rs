mod filesystem;
mod history;
mod memory;
mod storage;

pub use filesystem::FilesystemStore;
pub use history::{load_language, save_language, HistoryStore, HISTORY_KEY, LANGUAGE_KEY};
pub use memory::MemoryStore;
pub use storage::KeyValueStore;
