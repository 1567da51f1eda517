//! Run-scoped conflict tracking for one generation pass.

use std::collections::HashSet;

use crate::api::{ClassId, PeriodId, RoomId, TimetableSlot, TrainerId};
use crate::models::DayOfWeek;

/// Tracks which (day, period, resource) combinations are already committed
/// within a single generation run.
///
/// The index is rebuilt fresh for every invocation and never persisted:
/// exclusivity is re-derived from the accepted slot list, or built
/// incrementally as slots are accepted within the same run. It lives on the
/// scheduler's stack for exactly one run.
#[derive(Debug, Default)]
pub struct ConflictIndex {
    rooms: HashSet<(DayOfWeek, PeriodId, RoomId)>,
    trainers: HashSet<(DayOfWeek, PeriodId, TrainerId)>,
    classes: HashSet<(DayOfWeek, PeriodId, ClassId)>,
}

impl ConflictIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already-accepted slots.
    pub fn from_slots<'a, I>(slots: I) -> Self
    where
        I: IntoIterator<Item = &'a TimetableSlot>,
    {
        let mut index = Self::new();
        for slot in slots {
            index.mark_used(
                slot.day_of_week,
                slot.period_id,
                slot.room_id,
                slot.trainer_id,
                slot.class_id,
            );
        }
        index
    }

    /// True iff none of (room, day, period), (trainer, day, period) and
    /// (class, day, period) is already marked used.
    pub fn is_available(
        &self,
        day: DayOfWeek,
        period: PeriodId,
        room: RoomId,
        trainer: TrainerId,
        class: ClassId,
    ) -> bool {
        self.is_room_free(day, period, room)
            && self.is_trainer_free(day, period, trainer)
            && self.is_class_free(day, period, class)
    }

    /// True when no committed slot occupies the room at (day, period).
    pub fn is_room_free(&self, day: DayOfWeek, period: PeriodId, room: RoomId) -> bool {
        !self.rooms.contains(&(day, period, room))
    }

    /// True when the trainer has no committed slot at (day, period).
    pub fn is_trainer_free(&self, day: DayOfWeek, period: PeriodId, trainer: TrainerId) -> bool {
        !self.trainers.contains(&(day, period, trainer))
    }

    /// True when the class has no committed slot at (day, period).
    pub fn is_class_free(&self, day: DayOfWeek, period: PeriodId, class: ClassId) -> bool {
        !self.classes.contains(&(day, period, class))
    }

    /// Record a placement: marks the room, trainer and class keys as used.
    /// Idempotent within one run.
    pub fn mark_used(
        &mut self,
        day: DayOfWeek,
        period: PeriodId,
        room: RoomId,
        trainer: TrainerId,
        class: ClassId,
    ) {
        self.rooms.insert((day, period, room));
        self.trainers.insert((day, period, trainer));
        self.classes.insert((day, period, class));
    }

    /// Number of committed (day, period, room) keys, i.e. accepted placements.
    pub fn placements(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(index: u8) -> DayOfWeek {
        DayOfWeek::new(index).unwrap()
    }

    #[test]
    fn test_empty_index_is_available() {
        let index = ConflictIndex::new();
        assert!(index.is_available(
            day(1),
            PeriodId::new(1),
            RoomId::new(1),
            TrainerId::new(1),
            ClassId::new(1),
        ));
    }

    #[test]
    fn test_mark_used_blocks_all_three_resources() {
        let mut index = ConflictIndex::new();
        index.mark_used(
            day(1),
            PeriodId::new(1),
            RoomId::new(1),
            TrainerId::new(7),
            ClassId::new(9),
        );

        // Same room, different trainer/class.
        assert!(!index.is_available(
            day(1),
            PeriodId::new(1),
            RoomId::new(1),
            TrainerId::new(8),
            ClassId::new(10),
        ));
        // Same trainer, different room/class.
        assert!(!index.is_available(
            day(1),
            PeriodId::new(1),
            RoomId::new(2),
            TrainerId::new(7),
            ClassId::new(10),
        ));
        // Same class, different room/trainer.
        assert!(!index.is_available(
            day(1),
            PeriodId::new(1),
            RoomId::new(2),
            TrainerId::new(8),
            ClassId::new(9),
        ));
        // Different period is untouched.
        assert!(index.is_available(
            day(1),
            PeriodId::new(2),
            RoomId::new(1),
            TrainerId::new(7),
            ClassId::new(9),
        ));
        // Different day is untouched.
        assert!(index.is_available(
            day(2),
            PeriodId::new(1),
            RoomId::new(1),
            TrainerId::new(7),
            ClassId::new(9),
        ));
    }

    #[test]
    fn test_mark_used_is_idempotent() {
        let mut index = ConflictIndex::new();
        for _ in 0..3 {
            index.mark_used(
                day(2),
                PeriodId::new(1),
                RoomId::new(1),
                TrainerId::new(1),
                ClassId::new(1),
            );
        }
        assert_eq!(index.placements(), 1);
    }

    #[test]
    fn test_from_slots_rebuilds_exclusivity() {
        let slot = crate::api::NewTimetableSlot {
            term_id: crate::api::TermId::new(1),
            class_id: ClassId::new(3),
            subject_id: crate::api::SubjectId::new(4),
            trainer_id: TrainerId::new(5),
            room_id: RoomId::new(6),
            period_id: PeriodId::new(2),
            day_of_week: day(3),
            status: crate::api::SlotStatus::Scheduled,
            is_online_session: false,
        }
        .with_id(crate::api::SlotId::new(1));

        let index = ConflictIndex::from_slots([&slot]);
        assert!(!index.is_room_free(day(3), PeriodId::new(2), RoomId::new(6)));
        assert!(!index.is_trainer_free(day(3), PeriodId::new(2), TrainerId::new(5)));
        assert!(!index.is_class_free(day(3), PeriodId::new(2), ClassId::new(3)));
        assert!(index.is_room_free(day(3), PeriodId::new(1), RoomId::new(6)));
    }
}
