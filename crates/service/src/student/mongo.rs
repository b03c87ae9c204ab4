use async_trait::async_trait;
use futures::TryStreamExt;
use models::{SimplifiedStudent, Student, StudentFilter, StudentId, StudentPatch};
use mongodb::{bson::doc, options::FindOptions, Collection};

use crate::errors::ServiceError;
use crate::student::repository::{StudentRepository, UpdateOutcome};

/// MongoDB-backed repository. Holds a clone of the process-wide collection handle.
#[derive(Clone)]
pub struct MongoStudentRepository {
    collection: Collection<Student>,
}

impl MongoStudentRepository {
    pub fn new(collection: Collection<Student>) -> Self { Self { collection } }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn insert(&self, student: &Student) -> Result<StudentId, ServiceError> {
        let res = self
            .collection
            .insert_one(student, None)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        res.inserted_id
            .as_object_id()
            .map(StudentId::from)
            .ok_or_else(|| ServiceError::Store("inserted _id is not an ObjectId".into()))
    }

    async fn find(&self, filter: &StudentFilter) -> Result<Vec<SimplifiedStudent>, ServiceError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0, "name": 1, "age": 1 })
            .build();
        let cursor = self
            .collection
            .clone_with_type::<SimplifiedStudent>()
            .find(filter.to_document(), options)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        cursor.try_collect().await.map_err(|e| ServiceError::Store(e.to_string()))
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, ServiceError> {
        self.collection
            .find_one(id.filter(), None)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> Result<UpdateOutcome, ServiceError> {
        let res = self
            .collection
            .update_one(id.filter(), doc! { "$set": patch.to_set_document() }, None)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(UpdateOutcome { matched: res.matched_count, modified: res.modified_count })
    }

    async fn delete(&self, id: StudentId) -> Result<u64, ServiceError> {
        let res = self
            .collection
            .delete_one(id.filter(), None)
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(res.deleted_count)
    }
}
