//! Manual slot management.
//!
//! Operators adjust individual slots after generation: add a session, move
//! one to a different day, period or room, toggle online delivery, or cancel
//! it. Every write re-runs the single-slot validator so a manual edit can
//! never introduce a room or trainer double-booking.

use log::info;
use serde::{Deserialize, Serialize};

use crate::api::{NewTimetableSlot, PeriodId, RoomId, SlotId, SlotStatus, TimetableSlot};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::DayOfWeek;
use crate::scheduler::{validate_slot, SlotValidationError};

/// Partial update for a persisted slot. Absent fields keep their current
/// values. The slot's class, subject, trainer and term are fixed at
/// creation; moving a session to another trainer means deleting and
/// recreating it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SlotUpdate {
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub period_id: Option<PeriodId>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub status: Option<SlotStatus>,
    #[serde(default)]
    pub is_online_session: Option<bool>,
}

/// Validate and insert one manually created slot.
pub async fn create_slot<R: FullRepository + ?Sized>(
    repo: &R,
    slot: NewTimetableSlot,
) -> Result<TimetableSlot, SlotValidationError> {
    validate_slot(repo, &slot, None).await?;
    let persisted = repo.insert_slot(slot).await?;
    info!(
        "Created slot {} (term {}, class {}, {}, period {})",
        persisted.id, persisted.term_id, persisted.class_id, persisted.day_of_week,
        persisted.period_id
    );
    Ok(persisted)
}

/// Apply a partial update to a slot, re-validating the result with the
/// slot's own row excluded from conflict checks.
pub async fn update_slot<R: FullRepository + ?Sized>(
    repo: &R,
    slot_id: SlotId,
    changes: &SlotUpdate,
) -> Result<TimetableSlot, SlotValidationError> {
    let mut slot = repo.get_slot(slot_id).await?;

    if let Some(day) = changes.day_of_week {
        slot.day_of_week = day;
    }
    if let Some(period_id) = changes.period_id {
        slot.period_id = period_id;
    }
    if let Some(room_id) = changes.room_id {
        slot.room_id = room_id;
    }
    if let Some(status) = changes.status {
        slot.status = status;
    }
    if let Some(is_online) = changes.is_online_session {
        slot.is_online_session = is_online;
    }

    validate_slot(repo, &slot.as_new(), Some(slot_id)).await?;
    let persisted = repo.update_slot(slot).await?;
    info!(
        "Updated slot {} (now {}, period {}, room {})",
        persisted.id, persisted.day_of_week, persisted.period_id, persisted.room_id
    );
    Ok(persisted)
}

/// Delete one slot.
pub async fn delete_slot<R: FullRepository + ?Sized>(
    repo: &R,
    slot_id: SlotId,
) -> RepositoryResult<()> {
    repo.delete_slot(slot_id).await?;
    info!("Deleted slot {}", slot_id);
    Ok(())
}
