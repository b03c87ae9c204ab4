//! Service layer providing the student record operations on top of models.
//! - Separates business rules from data access behind `StudentRepository`.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod storage;
pub mod student;

pub use errors::ServiceError;
pub use storage::InMemoryStudentRepository;
pub use student::{MongoStudentRepository, StudentRepository, StudentService, UpdateOutcome};
