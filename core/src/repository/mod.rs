pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use error::StoreError;
pub use file::FileTaskStore;
pub use memory::InMemoryTaskStore;
pub use traits::TaskStore;
