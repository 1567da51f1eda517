//! Point conflict validation for manual slot create/update flows.
//!
//! Generation uses the run-scoped [`super::ConflictIndex`]; manual edits
//! happen outside any run, so the same exclusivity rules are enforced here
//! against the term's persisted slots instead.

use thiserror::Error;

use crate::api::{NewTimetableSlot, SlotId, TimetableSlot};
use crate::db::repository::{FullRepository, RepositoryError};

use super::error::SlotConflict;

/// Why a manual slot operation was rejected.
#[derive(Debug, Error)]
pub enum SlotValidationError {
    #[error(transparent)]
    Conflict(#[from] SlotConflict),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Validate one proposed slot against the store, in order: the
/// class-subject-term relationship must exist; an online session requires
/// the subject's can-be-online flag; no persisted slot in the term may share
/// (day, period, room) or (day, period, trainer). On update, `exclude`
/// carries the slot's own id so it does not collide with itself.
pub async fn validate_slot<R: FullRepository + ?Sized>(
    repo: &R,
    proposed: &NewTimetableSlot,
    exclude: Option<SlotId>,
) -> Result<(), SlotValidationError> {
    let linked = repo
        .class_subject_exists(proposed.class_id, proposed.subject_id, proposed.term_id)
        .await?;
    if !linked {
        return Err(SlotConflict::MissingClassSubject {
            term_id: proposed.term_id,
            class_id: proposed.class_id,
            subject_id: proposed.subject_id,
        }
        .into());
    }

    if proposed.is_online_session {
        let subject = repo.get_subject(proposed.subject_id).await?;
        if !subject.can_be_online {
            return Err(SlotConflict::OnlineNotAllowed {
                subject_id: proposed.subject_id,
            }
            .into());
        }
    }

    let existing = repo.list_slots(proposed.term_id).await?;
    if let Some(conflict) = point_conflict(proposed, exclude, &existing) {
        return Err(conflict.into());
    }

    Ok(())
}

/// The pure point check: first room collision wins, then first trainer
/// collision. Room conflicts take priority so the operator message stays
/// stable when a slot collides on both resources.
pub fn point_conflict(
    proposed: &NewTimetableSlot,
    exclude: Option<SlotId>,
    existing: &[TimetableSlot],
) -> Option<SlotConflict> {
    let is_other =
        |slot: &TimetableSlot| slot.term_id == proposed.term_id && exclude != Some(slot.id);
    let same_time = |slot: &TimetableSlot| {
        slot.day_of_week == proposed.day_of_week && slot.period_id == proposed.period_id
    };

    for slot in existing.iter().filter(|s| is_other(s) && same_time(s)) {
        if slot.room_id == proposed.room_id {
            return Some(SlotConflict::RoomOccupied {
                room_id: proposed.room_id,
                day: proposed.day_of_week,
                period_id: proposed.period_id,
                blocking_slot_id: slot.id,
                blocking_class_id: slot.class_id,
                blocking_subject_id: slot.subject_id,
            });
        }
    }

    for slot in existing.iter().filter(|s| is_other(s) && same_time(s)) {
        if slot.trainer_id == proposed.trainer_id {
            return Some(SlotConflict::TrainerBusy {
                trainer_id: proposed.trainer_id,
                day: proposed.day_of_week,
                period_id: proposed.period_id,
                blocking_slot_id: slot.id,
            });
        }
    }

    None
}
