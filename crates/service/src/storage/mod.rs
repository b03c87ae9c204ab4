//! Storage backends that do not need an external deployment.

pub mod memory_store;

pub use memory_store::InMemoryStudentRepository;
