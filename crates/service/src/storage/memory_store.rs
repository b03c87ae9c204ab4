use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use models::{SimplifiedStudent, Student, StudentFilter, StudentId, StudentPatch};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::student::repository::{StudentRepository, UpdateOutcome};

/// Process-local student collection.
///
/// Mirrors the document store's observable behavior: ids are assigned on insert,
/// updates report matched/modified counts, deletes report how many documents went away.
/// Listing follows ObjectId order, which is not guaranteed to be insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStudentRepository {
    inner: Arc<RwLock<BTreeMap<StudentId, Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, student: &Student) -> Result<StudentId, ServiceError> {
        let id = StudentId::generate();
        self.inner.write().await.insert(id, student.clone());
        Ok(id)
    }

    async fn find(&self, filter: &StudentFilter) -> Result<Vec<SimplifiedStudent>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().filter(|s| filter.matches(s)).map(SimplifiedStudent::from).collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, ServiceError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> Result<UpdateOutcome, ServiceError> {
        let mut map = self.inner.write().await;
        match map.get_mut(&id) {
            Some(student) => {
                let modified = patch.apply(student);
                Ok(UpdateOutcome { matched: 1, modified: u64::from(modified) })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete(&self, id: StudentId) -> Result<u64, ServiceError> {
        let removed = self.inner.write().await.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Address;

    fn student(name: &str, age: i64, country: &str) -> Student {
        Student {
            name: name.into(),
            age,
            address: Address { city: "Somewhere".into(), country: country.into() },
        }
    }

    #[tokio::test]
    async fn memory_store_crud_counts() -> Result<(), anyhow::Error> {
        let repo = InMemoryStudentRepository::new();
        assert!(repo.is_empty().await);

        let a = repo.insert(&student("Ana", 19, "India")).await?;
        let b = repo.insert(&student("Ana", 19, "India")).await?;
        assert_ne!(a, b, "identical records coexist under distinct ids");
        assert_eq!(repo.len().await, 2);

        let patch = StudentPatch { age: Some(20), ..Default::default() };
        assert_eq!(repo.update(a, &patch).await?, UpdateOutcome { matched: 1, modified: 1 });
        assert_eq!(repo.update(a, &patch).await?, UpdateOutcome { matched: 1, modified: 0 });
        assert_eq!(repo.update(StudentId::generate(), &patch).await?, UpdateOutcome::default());

        assert_eq!(repo.find_by_id(a).await?.map(|s| s.age), Some(20));
        assert_eq!(repo.delete(a).await?, 1);
        assert_eq!(repo.delete(a).await?, 0);
        assert!(repo.find_by_id(a).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_find_applies_filter_and_projects() -> Result<(), anyhow::Error> {
        let repo = InMemoryStudentRepository::new();
        repo.insert(&student("Jean", 20, "France")).await?;
        repo.insert(&student("Luc", 21, "France")).await?;
        repo.insert(&student("Ravi", 30, "India")).await?;

        let all = repo.find(&StudentFilter::default()).await?;
        assert_eq!(all.len(), 3);

        let mut french: Vec<String> = repo
            .find(&StudentFilter::from_query(Some("France".into()), None))
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();
        french.sort();
        assert_eq!(french, vec!["Jean", "Luc"]);

        let mut adults = repo.find(&StudentFilter::from_query(None, Some(21))).await?;
        adults.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(adults, vec![
            SimplifiedStudent { name: "Luc".into(), age: 21 },
            SimplifiedStudent { name: "Ravi".into(), age: 30 },
        ]);

        let none = repo.find(&StudentFilter::from_query(Some("Spain".into()), None)).await?;
        assert!(none.is_empty());
        Ok(())
    }
}
