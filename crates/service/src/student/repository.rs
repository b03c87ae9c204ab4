use async_trait::async_trait;
use models::{SimplifiedStudent, Student, StudentFilter, StudentId, StudentPatch};

use crate::errors::ServiceError;

/// Counts reported by a single-document update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Document-store primitives over the student collection.
/// Every method is exactly one store round trip.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn insert(&self, student: &Student) -> Result<StudentId, ServiceError>;
    async fn find(&self, filter: &StudentFilter) -> Result<Vec<SimplifiedStudent>, ServiceError>;
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, ServiceError>;
    async fn update(&self, id: StudentId, patch: &StudentPatch) -> Result<UpdateOutcome, ServiceError>;
    async fn delete(&self, id: StudentId) -> Result<u64, ServiceError>;
}
