//! Typed accessor over the device-local key-value store.
//!
//! All key names and persisted record shapes live here. Every value is written
//! as `{"version": N, "data": ...}`; a payload with another version, or one that
//! fails to decode, reads as absent.

use std::sync::Arc;

use quiz_core::model::{Category, FinalizedQuestions, QuestionId, SessionRecord, Student, StudentId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::repository::{KvStore, StorageError};

/// Version stamped on every record this build writes.
pub const RECORD_VERSION: u32 = 1;

/// The keys the quiz keeps on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey<'a> {
    Session {
        student: StudentId,
        category: &'a Category,
    },
    Finalized {
        student: StudentId,
        category: &'a Category,
    },
    AdminLoggedIn,
    CachedStudent,
}

impl StoreKey<'_> {
    /// Render the storage key. Category names are percent-encoded so any label
    /// maps to a single key segment.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Session { student, category } => {
                format!("quiz_sess_{student}_{}", encode(category))
            }
            Self::Finalized { student, category } => {
                format!("finalized_{student}_{}", encode(category))
            }
            Self::AdminLoggedIn => "admin_logged_in".to_string(),
            Self::CachedStudent => "student".to_string(),
        }
    }
}

fn encode(category: &Category) -> String {
    url::form_urlencoded::byte_serialize(category.as_str().as_bytes()).collect()
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KvStore>,
}

impl LocalStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    async fn read<T: DeserializeOwned>(&self, key: StoreKey<'_>) -> Result<Option<T>, StorageError> {
        let rendered = key.render();
        let Some(raw) = self.kv.get(&rendered).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) if envelope.version == RECORD_VERSION => Ok(Some(envelope.data)),
            Ok(envelope) => {
                warn!(
                    key = %rendered,
                    version = envelope.version,
                    "ignoring local record with unsupported version"
                );
                Ok(None)
            }
            Err(err) => {
                warn!(key = %rendered, error = %err, "ignoring corrupt local record");
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize>(&self, key: StoreKey<'_>, data: &T) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&EnvelopeRef {
            version: RECORD_VERSION,
            data,
        })
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(&key.render(), &payload).await
    }

    async fn remove(&self, key: StoreKey<'_>) -> Result<(), StorageError> {
        self.kv.remove(&key.render()).await
    }

    //
    // ─── SESSION RECORD ────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_session(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<Option<SessionRecord>, StorageError> {
        self.read(StoreKey::Session { student, category }).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub async fn save_session(
        &self,
        student: StudentId,
        category: &Category,
        record: &SessionRecord,
    ) -> Result<(), StorageError> {
        self.write(StoreKey::Session { student, category }, record)
            .await
    }

    /// Update only the navigation position, keeping the stored id list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or written.
    pub async fn save_position(
        &self,
        student: StudentId,
        category: &Category,
        current: Option<QuestionId>,
    ) -> Result<(), StorageError> {
        let mut record = self
            .load_session(student, category)
            .await?
            .unwrap_or_default();
        record.current_question_id = current;
        self.save_session(student, category, &record).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_session(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<(), StorageError> {
        self.remove(StoreKey::Session { student, category }).await
    }

    //
    // ─── FINALIZED QUESTIONS ───────────────────────────────────────────────────
    //

    /// Missing or unreadable lists load as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_finalized(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<FinalizedQuestions, StorageError> {
        Ok(self
            .read(StoreKey::Finalized { student, category })
            .await?
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub async fn save_finalized(
        &self,
        student: StudentId,
        category: &Category,
        finalized: &FinalizedQuestions,
    ) -> Result<(), StorageError> {
        self.write(StoreKey::Finalized { student, category }, finalized)
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_finalized(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<(), StorageError> {
        self.remove(StoreKey::Finalized { student, category }).await
    }

    //
    // ─── IDENTITY FLAGS ────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn is_admin_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self
            .read::<bool>(StoreKey::AdminLoggedIn)
            .await?
            .unwrap_or(false))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn set_admin_logged_in(&self, logged_in: bool) -> Result<(), StorageError> {
        if logged_in {
            self.write(StoreKey::AdminLoggedIn, &true).await
        } else {
            self.remove(StoreKey::AdminLoggedIn).await
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn cached_student(&self) -> Result<Option<Student>, StorageError> {
        self.read(StoreKey::CachedStudent).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the student cannot be written.
    pub async fn cache_student(&self, student: &Student) -> Result<(), StorageError> {
        self.write(StoreKey::CachedStudent, student).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_student(&self) -> Result<(), StorageError> {
        self.remove(StoreKey::CachedStudent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn store() -> (LocalStore, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        (LocalStore::new(Arc::new(repo.clone())), repo)
    }

    #[test]
    fn keys_are_namespaced_and_encoded() {
        let cat = category("التناظر اللفظي");
        let key = StoreKey::Session {
            student: StudentId::new(7),
            category: &cat,
        }
        .render();
        assert!(key.starts_with("quiz_sess_7_"));
        assert!(key.is_ascii());
        assert!(!key.contains(' '));

        let plain = category("math");
        assert_eq!(
            StoreKey::Finalized {
                student: StudentId::new(7),
                category: &plain
            }
            .render(),
            "finalized_7_math"
        );
    }

    #[tokio::test]
    async fn session_round_trip_and_position_merge() {
        let (store, _) = store();
        let cat = category("math");
        let student = StudentId::new(1);
        let ids = vec![QuestionId::new(3), QuestionId::new(1)];

        store
            .save_session(student, &cat, &SessionRecord::new(ids.clone(), None))
            .await
            .unwrap();
        store
            .save_position(student, &cat, Some(QuestionId::new(1)))
            .await
            .unwrap();

        let loaded = store.load_session(student, &cat).await.unwrap().unwrap();
        assert_eq!(loaded.ids, ids);
        assert_eq!(loaded.current_question_id, Some(QuestionId::new(1)));

        store.clear_session(student, &cat).await.unwrap();
        assert!(store.load_session(student, &cat).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn records_are_isolated_per_student_and_category() {
        let (store, _) = store();
        let math = category("math");
        let verbal = category("verbal");
        let record = SessionRecord::new(vec![QuestionId::new(1)], None);
        store
            .save_session(StudentId::new(1), &math, &record)
            .await
            .unwrap();

        assert!(store
            .load_session(StudentId::new(2), &math)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .load_session(StudentId::new(1), &verbal)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn corrupt_or_foreign_version_reads_as_absent() {
        let (store, repo) = store();
        let cat = category("math");
        let student = StudentId::new(1);

        repo.set("quiz_sess_1_math", "{not json").await.unwrap();
        assert!(store.load_session(student, &cat).await.unwrap().is_none());

        repo.set("finalized_1_math", r#"{"version":99,"data":[1,2]}"#)
            .await
            .unwrap();
        assert!(store.load_finalized(student, &cat).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_flag_and_cached_student() {
        let (store, repo) = store();
        assert!(!store.is_admin_logged_in().await.unwrap());
        store.set_admin_logged_in(true).await.unwrap();
        assert!(store.is_admin_logged_in().await.unwrap());
        store.set_admin_logged_in(false).await.unwrap();
        assert!(repo.is_empty());

        let student = Student {
            id: StudentId::new(4),
            name: "Sara".into(),
            phone: "0555".into(),
            email: None,
        };
        store.cache_student(&student).await.unwrap();
        assert_eq!(store.cached_student().await.unwrap(), Some(student));
        store.clear_student().await.unwrap();
        assert_eq!(store.cached_student().await.unwrap(), None);
    }
}
