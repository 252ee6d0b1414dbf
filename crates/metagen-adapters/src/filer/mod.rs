//! Filer adapters: where generated artifacts go.

pub mod local;
pub mod memory;

pub use local::DirectoryFiler;
pub use memory::MemoryFiler;
