//! Data Transfer Objects for the HTTP API.
//!
//! Most response types are re-exported from the service layer since they
//! already derive Serialize/Deserialize; this module adds the request
//! bodies and thin wrappers that only exist at the HTTP boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{NewTimetableSlot, SlotStatus, TimetableSlot};
pub use crate::scheduler::SkippedAssignment;
pub use crate::services::{
    DaySchedule, GenerationReport, GenerationRequest, GenerationStats, SlotUpdate, SlotView,
    TodaySlot, WeeklyTimetable,
};

use crate::api::{ClassId, PeriodId, RoomId, SubjectId, TermId, TrainerId};
use crate::models::DayOfWeek;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
}

/// Request body for creating one slot manually. The term comes from the
/// request path; a manually created slot always starts out `scheduled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub trainer_id: TrainerId,
    pub room_id: RoomId,
    pub period_id: PeriodId,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub is_online_session: bool,
}

impl CreateSlotRequest {
    pub fn into_new_slot(self, term_id: TermId) -> NewTimetableSlot {
        NewTimetableSlot {
            term_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            trainer_id: self.trainer_id,
            room_id: self.room_id,
            period_id: self.period_id,
            day_of_week: self.day_of_week,
            status: SlotStatus::default(),
            is_online_session: self.is_online_session,
        }
    }
}

/// Response for the trainer attendance feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerTodayResponse {
    /// The date the feed was computed for
    pub date: NaiveDate,
    /// Sessions ordered by start time, each with its check-in window
    pub slots: Vec<TodaySlot>,
}
