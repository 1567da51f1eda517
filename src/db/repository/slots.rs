//! Slot repository trait for the timetable itself.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewTimetableSlot, SlotId, TermId, TimetableSlot, TrainerId};
use crate::models::DayOfWeek;

/// Repository trait for reading and writing timetable slots.
///
/// Implementations enforce two uniqueness backstops on every write: no two
/// slots in a term may share (day, period, room) or (day, period, trainer).
/// Writes that would violate either return
/// [`RepositoryError::ConstraintViolation`](super::RepositoryError::ConstraintViolation).
#[async_trait]
pub trait SlotRepository: Send + Sync {
    // ==================== Reads ====================

    /// Count the persisted slots for a term.
    async fn count_slots(&self, term_id: TermId) -> RepositoryResult<usize>;

    /// List all persisted slots for a term.
    async fn list_slots(&self, term_id: TermId) -> RepositoryResult<Vec<TimetableSlot>>;

    /// List a trainer's slots for one day of the week within a term.
    async fn list_slots_for_trainer_on_day(
        &self,
        term_id: TermId,
        trainer_id: TrainerId,
        day: DayOfWeek,
    ) -> RepositoryResult<Vec<TimetableSlot>>;

    /// Retrieve a slot by ID.
    ///
    /// # Returns
    /// * `Ok(TimetableSlot)` - The slot
    /// * `Err(RepositoryError::NotFound)` - If the slot doesn't exist
    async fn get_slot(&self, slot_id: SlotId) -> RepositoryResult<TimetableSlot>;

    // ==================== Writes ====================

    /// Insert one slot, subject to the uniqueness backstops.
    async fn insert_slot(&self, slot: NewTimetableSlot) -> RepositoryResult<TimetableSlot>;

    /// Replace a persisted slot's fields, subject to the uniqueness
    /// backstops (the slot's own row is excluded from the check).
    async fn update_slot(&self, slot: TimetableSlot) -> RepositoryResult<TimetableSlot>;

    /// Delete a slot by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the slot doesn't exist
    async fn delete_slot(&self, slot_id: SlotId) -> RepositoryResult<()>;

    /// Insert a batch of generated slots for one term in a single
    /// transaction: either every slot is committed or none is.
    ///
    /// # Arguments
    /// * `term_id` - The term every slot in the batch must belong to
    /// * `slots` - The accepted slots from a generation run
    ///
    /// # Returns
    /// * `Ok(Vec<TimetableSlot>)` - The persisted slots with assigned ids
    /// * `Err(RepositoryError::ValidationError)` - If a slot names another term
    /// * `Err(RepositoryError::ConstraintViolation)` - If the batch violates
    ///   a uniqueness backstop; nothing is committed
    async fn insert_slots_batch(
        &self,
        term_id: TermId,
        slots: Vec<NewTimetableSlot>,
    ) -> RepositoryResult<Vec<TimetableSlot>>;

    /// Delete all slots for a term (all-or-nothing).
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of slots deleted
    async fn delete_slots_for_term(&self, term_id: TermId) -> RepositoryResult<usize>;
}
