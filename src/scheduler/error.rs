//! Error types for timetable generation and single-slot validation.

use serde::Serialize;
use thiserror::Error;

use crate::api::{ClassId, PeriodId, RoomId, SlotId, SubjectId, TermId, TrainerId};
use crate::db::repository::RepositoryError;
use crate::models::DayOfWeek;

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Failures that abort a generation request before any slot is persisted.
///
/// Configuration errors (missing term, empty catalogs) and policy errors
/// (regeneration window, existing timetable) are all fatal to the request
/// and leave the store untouched. Under-scheduled assignments are not errors;
/// they are reported as [`crate::scheduler::SkippedAssignment`] entries.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Term {0} not found")]
    TermNotFound(TermId),

    #[error("No working days configured for term {0}")]
    NoWorkingDays(TermId),

    #[error("No active lesson periods configured")]
    NoActivePeriods,

    #[error("No active rooms available")]
    NoActiveRooms,

    #[error("No trainer assignments found for term {0}")]
    NoAssignments(TermId),

    #[error("Timetable already exists for term {0}; set regenerate to rebuild it")]
    TimetableExists(TermId),

    #[error(
        "Cannot regenerate term {term_id}: more than 2 weeks since term start \
         ({days_elapsed} days elapsed)"
    )]
    RegenerationWindowExpired { term_id: TermId, days_elapsed: i64 },

    #[error("sessions_per_week must be between 1 and 5, got {0}")]
    InvalidSessionsPerWeek(u8),

    #[error("min_classes_per_day must be at least 1, got {0}")]
    InvalidMinClassesPerDay(u8),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Rejection reasons from the single-slot conflict validator.
///
/// Room collisions are reported before trainer collisions when both exist,
/// matching the message order operators rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum SlotConflict {
    #[error("No class-subject mapping for class {class_id} and subject {subject_id} in term {term_id}")]
    MissingClassSubject {
        term_id: TermId,
        class_id: ClassId,
        subject_id: SubjectId,
    },

    #[error("Subject {subject_id} cannot be delivered online")]
    OnlineNotAllowed { subject_id: SubjectId },

    #[error(
        "Room {room_id} is already occupied on {day}, period {period_id} by slot \
         {blocking_slot_id} (class {blocking_class_id}, subject {blocking_subject_id})"
    )]
    RoomOccupied {
        room_id: RoomId,
        day: DayOfWeek,
        period_id: PeriodId,
        blocking_slot_id: SlotId,
        blocking_class_id: ClassId,
        blocking_subject_id: SubjectId,
    },

    #[error(
        "Trainer {trainer_id} is already booked on {day}, period {period_id} by slot \
         {blocking_slot_id}"
    )]
    TrainerBusy {
        trainer_id: TrainerId,
        day: DayOfWeek,
        period_id: PeriodId,
        blocking_slot_id: SlotId,
    },
}
