use std::sync::Arc;

use models::{NewStudent, SimplifiedStudent, Student, StudentFilter, StudentId, StudentPatch};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::student::repository::StudentRepository;

const ENTITY: &str = "Student";

/// Record service over the student collection.
///
/// Stateless: each call validates its input, issues one store primitive and maps the
/// outcome. Malformed ids are reported as not found, same as ids with no record.
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self { Self { repo } }

    fn parse_id(id: &str) -> Result<StudentId, ServiceError> {
        StudentId::parse(id).map_err(|_| {
            debug!(%id, "malformed student id");
            ServiceError::not_found(ENTITY)
        })
    }

    /// Insert a fully populated student; returns the store-assigned id.
    #[instrument(skip_all)]
    pub async fn create(&self, input: NewStudent) -> Result<StudentId, ServiceError> {
        let student = input.validate()?;
        let id = self.repo.insert(&student).await?;
        info!(event = "student_created", id = %id, "created student");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: StudentFilter) -> Result<Vec<SimplifiedStudent>, ServiceError> {
        let rows = self.repo.find(&filter).await?;
        debug!(count = rows.len(), "listed students");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Student, ServiceError> {
        let sid = Self::parse_id(id)?;
        self.repo
            .find_by_id(sid)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Apply only the fields present in `patch`.
    ///
    /// Succeeds only when at least one stored value changed; an unknown id and a
    /// no-op patch both come back as NotFound.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: StudentPatch) -> Result<(), ServiceError> {
        let sid = Self::parse_id(id)?;
        if patch.is_empty() {
            debug!(id = %sid, "empty patch, nothing to modify");
            return Err(ServiceError::not_found(ENTITY));
        }
        let outcome = self.repo.update(sid, &patch).await?;
        if outcome.modified == 0 {
            debug!(id = %sid, matched = outcome.matched, "update modified nothing");
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(event = "student_updated", id = %sid, "updated student");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let sid = Self::parse_id(id)?;
        if self.repo.delete(sid).await? == 0 {
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(event = "student_deleted", id = %sid, "deleted student");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStudentRepository;
    use models::{Address, NewAddress};

    fn service() -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentRepository::new()))
    }

    fn new_student(name: &str, age: i64, city: &str, country: &str) -> NewStudent {
        NewStudent {
            name: Some(name.into()),
            age: Some(age),
            address: Some(NewAddress { city: Some(city.into()), country: Some(country.into()) }),
        }
    }

    #[tokio::test]
    async fn full_lifecycle_scenario() -> Result<(), anyhow::Error> {
        let svc = service();
        let id = svc.create(new_student("Ana", 19, "Pune", "India")).await?.to_string();

        let fetched = svc.get(&id).await?;
        assert_eq!(fetched, Student {
            name: "Ana".into(),
            age: 19,
            address: Address { city: "Pune".into(), country: "India".into() },
        });

        let listed = svc.list(StudentFilter::from_query(Some("India".into()), Some(18))).await?;
        assert_eq!(listed, vec![SimplifiedStudent { name: "Ana".into(), age: 19 }]);

        svc.update(&id, StudentPatch { age: Some(20), ..Default::default() }).await?;
        let after = svc.get(&id).await?;
        assert_eq!(after.age, 20);
        assert_eq!(after.name, "Ana");
        assert_eq!(after.address.city, "Pune");

        svc.delete(&id).await?;
        assert!(matches!(svc.get(&id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_incomplete_student() {
        let svc = service();
        let mut input = new_student("Ana", 19, "Pune", "India");
        input.age = None;
        let err = svc.create(input).await.unwrap_err();
        assert!(err.is_validation());
        assert!(svc.list(StudentFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_without_filters_returns_everything() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.create(new_student("A", 20, "Paris", "France")).await?;
        svc.create(new_student("B", 21, "Lyon", "France")).await?;
        svc.create(new_student("C", 22, "Pune", "India")).await?;

        assert_eq!(svc.list(StudentFilter::default()).await?.len(), 3);

        let french = svc.list(StudentFilter::from_query(Some("France".into()), None)).await?;
        assert_eq!(french.len(), 2);

        let from_21 = svc.list(StudentFilter::from_query(None, Some(21))).await?;
        assert!(from_21.iter().all(|s| s.age >= 21));
        assert!(!from_21.iter().any(|s| s.name == "A"));
        assert!(from_21.iter().any(|s| s.name == "B"));
        Ok(())
    }

    #[tokio::test]
    async fn get_with_malformed_or_unknown_id_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get("xyz").await, Err(ServiceError::NotFound(_))));
        let unknown = StudentId::generate().to_string();
        let err = svc.get(&unknown).await.unwrap_err();
        assert_eq!(err.to_string(), "Student not found");
    }

    #[tokio::test]
    async fn update_without_change_is_not_found() -> Result<(), anyhow::Error> {
        let svc = service();
        let id = svc.create(new_student("Ana", 19, "Pune", "India")).await?.to_string();

        let same = StudentPatch { age: Some(19), ..Default::default() };
        assert!(matches!(svc.update(&id, same).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(&id, StudentPatch::default()).await, Err(ServiceError::NotFound(_))));

        let unknown = StudentId::generate().to_string();
        let patch = StudentPatch { name: Some("Bo".into()), ..Default::default() };
        assert!(matches!(svc.update(&unknown, patch).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_address_as_a_whole() -> Result<(), anyhow::Error> {
        let svc = service();
        let id = svc.create(new_student("Ana", 19, "Pune", "India")).await?.to_string();
        let patch = StudentPatch {
            address: Some(Address { city: "Lyon".into(), country: "France".into() }),
            ..Default::default()
        };
        svc.update(&id, patch).await?;
        let s = svc.get(&id).await?;
        assert_eq!(s.address, Address { city: "Lyon".into(), country: "France".into() });
        assert_eq!(s.age, 19);
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_fails_second_time() -> Result<(), anyhow::Error> {
        let svc = service();
        let id = svc.create(new_student("Ana", 19, "Pune", "India")).await?.to_string();
        svc.delete(&id).await?;
        assert!(matches!(svc.delete(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete("bogus").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
