//! Catalog repository trait for scheduling reference data.
//!
//! Terms, classes, subjects, trainers, rooms and lesson periods are
//! maintained by the surrounding platform; the engine only reads them.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{
    ClassGroup, ClassId, LessonPeriod, PeriodId, Room, RoomId, Subject, SubjectId, Term, TermId,
    Trainer, TrainerId,
};

/// Repository trait for read access to the scheduling catalogs.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if the connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Terms ====================

    /// Retrieve a term by ID.
    ///
    /// # Returns
    /// * `Ok(Term)` - The term
    /// * `Err(RepositoryError::NotFound)` - If the term doesn't exist
    async fn get_term(&self, term_id: TermId) -> RepositoryResult<Term>;

    /// Retrieve the currently active term, if any.
    ///
    /// By convention exactly one term is active at a time; when several are
    /// flagged, the one with the latest start date wins.
    async fn get_active_term(&self) -> RepositoryResult<Option<Term>>;

    // ==================== Classes, Subjects & Trainers ====================

    /// Retrieve a class by ID.
    async fn get_class(&self, class_id: ClassId) -> RepositoryResult<ClassGroup>;

    /// Retrieve a subject by ID.
    ///
    /// # Returns
    /// * `Ok(Subject)` - The subject, including its can-be-online flag
    /// * `Err(RepositoryError::NotFound)` - If the subject doesn't exist
    async fn get_subject(&self, subject_id: SubjectId) -> RepositoryResult<Subject>;

    /// Retrieve a trainer directory entry by ID.
    async fn get_trainer(&self, trainer_id: TrainerId) -> RepositoryResult<Trainer>;

    // ==================== Rooms & Periods ====================

    /// Retrieve a room by ID.
    async fn get_room(&self, room_id: RoomId) -> RepositoryResult<Room>;

    /// List all active rooms.
    async fn list_active_rooms(&self) -> RepositoryResult<Vec<Room>>;

    /// Retrieve a lesson period by ID.
    async fn get_period(&self, period_id: PeriodId) -> RepositoryResult<LessonPeriod>;

    /// List all active lesson periods, ordered by start time.
    async fn list_active_periods(&self) -> RepositoryResult<Vec<LessonPeriod>>;
}
