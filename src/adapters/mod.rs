// Adapters layer: concrete implementations of the domain ports.

pub mod local;
pub mod memory;

pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;
