//! Student records: repository seam, MongoDB adapter and the record service.

pub mod mongo;
pub mod repository;
pub mod service;

pub use mongo::MongoStudentRepository;
pub use repository::{StudentRepository, UpdateOutcome};
pub use service::StudentService;
