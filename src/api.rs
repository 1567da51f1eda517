//! Public API surface for the Rust backend.
//!
//! This file consolidates the domain entities and DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::scheduler::CandidateSlot;
pub use crate::scheduler::PlacementOutcome;
pub use crate::scheduler::SkippedAssignment;
pub use crate::services::attendance::CheckinWindow;
pub use crate::services::attendance::TodaySlot;
pub use crate::services::generation::GenerationReport;
pub use crate::services::generation::GenerationRequest;
pub use crate::services::generation::GenerationStats;
pub use crate::services::views::DaySchedule;
pub use crate::services::views::SlotView;
pub use crate::services::views::WeeklyTimetable;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub use crate::models::DayOfWeek;

crate::define_id_type!(i64, TermId);
crate::define_id_type!(i64, ClassId);
crate::define_id_type!(i64, SubjectId);
crate::define_id_type!(i64, TrainerId);
crate::define_id_type!(i64, RoomId);
crate::define_id_type!(i64, PeriodId);
crate::define_id_type!(i64, SlotId);
crate::define_id_type!(i64, AssignmentId);

/// A scheduling horizon (e.g. a semester) with explicit working days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Ordered working-day indices, 0 = Sunday .. 6 = Saturday.
    pub working_days: Vec<DayOfWeek>,
    /// Dates with no teaching. Display only; generation plans by weekday.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    pub active: bool,
}

/// A cohort of learners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: ClassId,
    pub name: String,
    pub department: String,
    pub active: bool,
}

/// A taught subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub department: String,
    pub credit_hours: i32,
    /// Whether sessions of this subject may be delivered online.
    pub can_be_online: bool,
}

/// Directory entry for a trainer. Identity and credentials live in the
/// external identity layer; only the display data is mirrored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
}

/// Declares that a subject is taught to a class during a specific term.
/// Must exist before any slot referencing the triple can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSubject {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub term_id: TermId,
}

/// Declares which trainer teaches which class-subject combination in a term.
/// One active assignment is one unit of scheduling demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerAssignment {
    pub id: AssignmentId,
    pub trainer_id: TrainerId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub term_id: TermId,
    pub active: bool,
}

/// A schedulable physical or virtual resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub room_type: String,
    pub active: bool,
}

/// A fixed daily time window, shared across all days of the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPeriod {
    pub id: PeriodId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub active: bool,
}

/// Lifecycle state of a timetable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl Default for SlotStatus {
    fn default() -> Self {
        SlotStatus::Scheduled
    }
}

/// One concrete scheduled occurrence: the unit of scheduling supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableSlot {
    pub id: SlotId,
    pub term_id: TermId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub trainer_id: TrainerId,
    pub room_id: RoomId,
    pub period_id: PeriodId,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default)]
    pub is_online_session: bool,
}

impl TimetableSlot {
    /// The insert-form view of this slot, used when re-validating an edit
    /// against the rest of the timetable.
    pub fn as_new(&self) -> NewTimetableSlot {
        NewTimetableSlot {
            term_id: self.term_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            trainer_id: self.trainer_id,
            room_id: self.room_id,
            period_id: self.period_id,
            day_of_week: self.day_of_week,
            status: self.status,
            is_online_session: self.is_online_session,
        }
    }
}

/// Insert form of [`TimetableSlot`], before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimetableSlot {
    pub term_id: TermId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub trainer_id: TrainerId,
    pub room_id: RoomId,
    pub period_id: PeriodId,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default)]
    pub is_online_session: bool,
}

impl NewTimetableSlot {
    /// Attach the store-assigned id, producing the persisted form.
    pub fn with_id(self, id: SlotId) -> TimetableSlot {
        TimetableSlot {
            id,
            term_id: self.term_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            trainer_id: self.trainer_id,
            room_id: self.room_id,
            period_id: self.period_id,
            day_of_week: self.day_of_week,
            status: self.status,
            is_online_session: self.is_online_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_id_new() {
        let id = TermId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_term_id_equality() {
        let id1 = TermId::new(100);
        let id2 = TermId::new(100);
        let id3 = TermId::new(101);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_slot_id_ordering() {
        let id1 = SlotId::new(1);
        let id2 = SlotId::new(2);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_room_id_display() {
        let id = RoomId::new(7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_slot_status_serde() {
        assert_eq!(
            serde_json::to_string(&SlotStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
        let parsed: SlotStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, SlotStatus::Cancelled);
    }

    #[test]
    fn test_new_slot_with_id() {
        let slot = NewTimetableSlot {
            term_id: TermId::new(1),
            class_id: ClassId::new(2),
            subject_id: SubjectId::new(3),
            trainer_id: TrainerId::new(4),
            room_id: RoomId::new(5),
            period_id: PeriodId::new(6),
            day_of_week: DayOfWeek::new(1).unwrap(),
            status: SlotStatus::default(),
            is_online_session: false,
        }
        .with_id(SlotId::new(9));

        assert_eq!(slot.id.value(), 9);
        assert_eq!(slot.status, SlotStatus::Scheduled);
        assert_eq!(slot.day_of_week.index(), 1);
    }
}
