//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::*;
use crate::db::repository::*;
use crate::models::DayOfWeek;

/// In-memory local repository.
///
/// Stores all data behind one `RwLock`, making it ideal for tests and local
/// development that need isolation and speed. Catalog entities are seeded
/// through the `add_*` helpers with caller-chosen ids (they come from the
/// surrounding platform in production); slot ids are assigned by the store.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    terms: HashMap<TermId, Term>,
    classes: HashMap<ClassId, ClassGroup>,
    subjects: HashMap<SubjectId, Subject>,
    trainers: HashMap<TrainerId, Trainer>,
    rooms: HashMap<RoomId, Room>,
    periods: HashMap<PeriodId, LessonPeriod>,
    class_subjects: Vec<ClassSubject>,
    assignments: Vec<TrainerAssignment>,
    slots: HashMap<SlotId, TimetableSlot>,

    next_slot_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            terms: HashMap::new(),
            classes: HashMap::new(),
            subjects: HashMap::new(),
            trainers: HashMap::new(),
            rooms: HashMap::new(),
            periods: HashMap::new(),
            class_subjects: Vec::new(),
            assignments: Vec::new(),
            slots: HashMap::new(),
            next_slot_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    /// Find a persisted slot violating room or trainer exclusivity against
    /// the given key, ignoring `exclude` (a slot never collides with itself).
    fn blocking_slot(
        &self,
        term_id: TermId,
        day: DayOfWeek,
        period_id: PeriodId,
        room_id: RoomId,
        trainer_id: TrainerId,
        exclude: Option<SlotId>,
    ) -> Option<&TimetableSlot> {
        self.slots.values().find(|slot| {
            exclude != Some(slot.id)
                && slot.term_id == term_id
                && slot.day_of_week == day
                && slot.period_id == period_id
                && (slot.room_id == room_id || slot.trainer_id == trainer_id)
        })
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    // ==================== Seeding helpers ====================

    /// Add a term to the repository.
    pub fn add_term(&self, term: Term) {
        self.data.write().terms.insert(term.id, term);
    }

    /// Add a class to the repository.
    pub fn add_class(&self, class: ClassGroup) {
        self.data.write().classes.insert(class.id, class);
    }

    /// Add a subject to the repository.
    pub fn add_subject(&self, subject: Subject) {
        self.data.write().subjects.insert(subject.id, subject);
    }

    /// Add a trainer directory entry to the repository.
    pub fn add_trainer(&self, trainer: Trainer) {
        self.data.write().trainers.insert(trainer.id, trainer);
    }

    /// Add a room to the repository.
    pub fn add_room(&self, room: Room) {
        self.data.write().rooms.insert(room.id, room);
    }

    /// Add a lesson period to the repository.
    pub fn add_period(&self, period: LessonPeriod) {
        self.data.write().periods.insert(period.id, period);
    }

    /// Declare a class-subject-term relationship.
    pub fn add_class_subject(&self, link: ClassSubject) {
        self.data.write().class_subjects.push(link);
    }

    /// Add a trainer assignment (one unit of scheduling demand).
    pub fn add_assignment(&self, assignment: TrainerAssignment) {
        self.data.write().assignments.push(assignment);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Number of slots stored across all terms.
    pub fn slot_count(&self) -> usize {
        self.data.read().slots.len()
    }

    /// Helper to check health and return an error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_term(&self, term_id: TermId) -> RepositoryResult<Term> {
        self.check_health()?;
        self.data.read().terms.get(&term_id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Term {} not found", term_id),
                ErrorContext::new("get_term").with_entity("term").with_entity_id(term_id),
            )
        })
    }

    async fn get_active_term(&self) -> RepositoryResult<Option<Term>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .terms
            .values()
            .filter(|term| term.active)
            .max_by_key(|term| term.start_date)
            .cloned())
    }

    async fn get_class(&self, class_id: ClassId) -> RepositoryResult<ClassGroup> {
        self.check_health()?;
        self.data.read().classes.get(&class_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Class {} not found", class_id))
        })
    }

    async fn get_subject(&self, subject_id: SubjectId) -> RepositoryResult<Subject> {
        self.check_health()?;
        self.data.read().subjects.get(&subject_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Subject {} not found", subject_id))
        })
    }

    async fn get_trainer(&self, trainer_id: TrainerId) -> RepositoryResult<Trainer> {
        self.check_health()?;
        self.data.read().trainers.get(&trainer_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Trainer {} not found", trainer_id))
        })
    }

    async fn get_room(&self, room_id: RoomId) -> RepositoryResult<Room> {
        self.check_health()?;
        self.data.read().rooms.get(&room_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Room {} not found", room_id))
        })
    }

    async fn list_active_rooms(&self) -> RepositoryResult<Vec<Room>> {
        self.check_health()?;
        let data = self.data.read();
        let mut rooms: Vec<Room> = data.rooms.values().filter(|r| r.active).cloned().collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn get_period(&self, period_id: PeriodId) -> RepositoryResult<LessonPeriod> {
        self.check_health()?;
        self.data.read().periods.get(&period_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Lesson period {} not found", period_id))
        })
    }

    async fn list_active_periods(&self) -> RepositoryResult<Vec<LessonPeriod>> {
        self.check_health()?;
        let data = self.data.read();
        let mut periods: Vec<LessonPeriod> =
            data.periods.values().filter(|p| p.active).cloned().collect();
        periods.sort_by_key(|p| p.start_time);
        Ok(periods)
    }
}

#[async_trait]
impl AssignmentRepository for LocalRepository {
    async fn class_subject_exists(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        term_id: TermId,
    ) -> RepositoryResult<bool> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data.class_subjects.iter().any(|link| {
            link.class_id == class_id && link.subject_id == subject_id && link.term_id == term_id
        }))
    }

    async fn list_active_assignments(
        &self,
        term_id: TermId,
    ) -> RepositoryResult<Vec<TrainerAssignment>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .assignments
            .iter()
            .filter(|a| a.term_id == term_id && a.active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SlotRepository for LocalRepository {
    async fn count_slots(&self, term_id: TermId) -> RepositoryResult<usize> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data.slots.values().filter(|s| s.term_id == term_id).count())
    }

    async fn list_slots(&self, term_id: TermId) -> RepositoryResult<Vec<TimetableSlot>> {
        self.check_health()?;
        let data = self.data.read();
        let mut slots: Vec<TimetableSlot> = data
            .slots
            .values()
            .filter(|s| s.term_id == term_id)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.id);
        Ok(slots)
    }

    async fn list_slots_for_trainer_on_day(
        &self,
        term_id: TermId,
        trainer_id: TrainerId,
        day: DayOfWeek,
    ) -> RepositoryResult<Vec<TimetableSlot>> {
        self.check_health()?;
        let data = self.data.read();
        let mut slots: Vec<TimetableSlot> = data
            .slots
            .values()
            .filter(|s| s.term_id == term_id && s.trainer_id == trainer_id && s.day_of_week == day)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.id);
        Ok(slots)
    }

    async fn get_slot(&self, slot_id: SlotId) -> RepositoryResult<TimetableSlot> {
        self.check_health()?;
        self.data.read().slots.get(&slot_id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Slot {} not found", slot_id),
                ErrorContext::new("get_slot").with_entity("slot").with_entity_id(slot_id),
            )
        })
    }

    async fn insert_slot(&self, slot: NewTimetableSlot) -> RepositoryResult<TimetableSlot> {
        self.check_health()?;
        let mut data = self.data.write();

        if let Some(blocking) = data.blocking_slot(
            slot.term_id,
            slot.day_of_week,
            slot.period_id,
            slot.room_id,
            slot.trainer_id,
            None,
        ) {
            return Err(constraint_error("insert_slot", blocking));
        }

        let id = SlotId::new(data.next_slot_id);
        data.next_slot_id += 1;
        let persisted = slot.with_id(id);
        data.slots.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update_slot(&self, slot: TimetableSlot) -> RepositoryResult<TimetableSlot> {
        self.check_health()?;
        let mut data = self.data.write();

        let stored = data.slots.get(&slot.id).ok_or_else(|| {
            RepositoryError::not_found(format!("Slot {} not found", slot.id))
        })?;
        if stored.term_id != slot.term_id {
            return Err(RepositoryError::validation(format!(
                "Slot {} cannot move from term {} to term {}",
                slot.id, stored.term_id, slot.term_id
            )));
        }

        if let Some(blocking) = data.blocking_slot(
            slot.term_id,
            slot.day_of_week,
            slot.period_id,
            slot.room_id,
            slot.trainer_id,
            Some(slot.id),
        ) {
            return Err(constraint_error("update_slot", blocking));
        }

        data.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    async fn delete_slot(&self, slot_id: SlotId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        data.slots
            .remove(&slot_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(format!("Slot {} not found", slot_id)))
    }

    async fn insert_slots_batch(
        &self,
        term_id: TermId,
        slots: Vec<NewTimetableSlot>,
    ) -> RepositoryResult<Vec<TimetableSlot>> {
        self.check_health()?;
        let mut data = self.data.write();

        // Validate everything before touching the map so a failed batch
        // commits nothing.
        let mut room_keys: HashSet<(DayOfWeek, PeriodId, RoomId)> = HashSet::new();
        let mut trainer_keys: HashSet<(DayOfWeek, PeriodId, TrainerId)> = HashSet::new();

        for slot in &slots {
            if slot.term_id != term_id {
                return Err(RepositoryError::validation(format!(
                    "Batch for term {} contains a slot for term {}",
                    term_id, slot.term_id
                )));
            }
            if let Some(blocking) = data.blocking_slot(
                slot.term_id,
                slot.day_of_week,
                slot.period_id,
                slot.room_id,
                slot.trainer_id,
                None,
            ) {
                return Err(constraint_error("insert_slots_batch", blocking));
            }
            if !room_keys.insert((slot.day_of_week, slot.period_id, slot.room_id)) {
                return Err(RepositoryError::constraint_with_context(
                    format!(
                        "Batch places room {} twice on {}, period {}",
                        slot.room_id, slot.day_of_week, slot.period_id
                    ),
                    ErrorContext::new("insert_slots_batch").with_entity("slot"),
                ));
            }
            if !trainer_keys.insert((slot.day_of_week, slot.period_id, slot.trainer_id)) {
                return Err(RepositoryError::constraint_with_context(
                    format!(
                        "Batch books trainer {} twice on {}, period {}",
                        slot.trainer_id, slot.day_of_week, slot.period_id
                    ),
                    ErrorContext::new("insert_slots_batch").with_entity("slot"),
                ));
            }
        }

        let mut persisted = Vec::with_capacity(slots.len());
        for slot in slots {
            let id = SlotId::new(data.next_slot_id);
            data.next_slot_id += 1;
            let stored = slot.with_id(id);
            data.slots.insert(id, stored.clone());
            persisted.push(stored);
        }
        Ok(persisted)
    }

    async fn delete_slots_for_term(&self, term_id: TermId) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        let before = data.slots.len();
        data.slots.retain(|_, slot| slot.term_id != term_id);
        Ok(before - data.slots.len())
    }
}

fn constraint_error(operation: &str, blocking: &TimetableSlot) -> RepositoryError {
    RepositoryError::constraint_with_context(
        format!(
            "Slot collides with slot {} (room {}, trainer {}) on {}, period {}",
            blocking.id, blocking.room_id, blocking.trainer_id, blocking.day_of_week,
            blocking.period_id
        ),
        ErrorContext::new(operation)
            .with_entity("slot")
            .with_entity_id(blocking.id),
    )
}
