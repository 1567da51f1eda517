//! Two-pass greedy placement of trainer assignments.

use std::collections::HashSet;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api::{
    AssignmentId, ClassId, NewTimetableSlot, Room, SlotStatus, SubjectId, Term, TrainerAssignment,
    TrainerId,
};
use crate::models::DayOfWeek;

use super::candidates::CandidateSlot;
use super::conflict::ConflictIndex;

/// An assignment that could not receive all requested sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedAssignment {
    pub assignment_id: AssignmentId,
    pub trainer_id: TrainerId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    /// Sessions actually placed for this assignment.
    pub scheduled: u32,
    /// Sessions requested (`sessions_per_week`).
    pub requested: u32,
    pub reason: String,
}

/// Result of one placement run: the accepted slots plus every assignment
/// that ended up under its requested session count.
#[derive(Debug)]
pub struct PlacementOutcome {
    pub slots: Vec<NewTimetableSlot>,
    pub skipped: Vec<SkippedAssignment>,
}

/// Place `sessions_per_week` slots for every assignment, in assignment order.
///
/// Pass 1 prefers spreading an assignment's sessions across distinct days:
/// a candidate is skipped when its day was already used for this assignment
/// and fewer than `min(sessions_per_week, working_days)` distinct days have
/// been used so far. Pass 2 fills any remainder from the same shuffled
/// candidate list without the same-day restriction.
///
/// Acceptance is monotonic: a slot is never revoked once accepted, so every
/// emitted slot is conflict-free against all slots emitted earlier in the
/// run. Assignments processed later may be starved of rooms by earlier ones;
/// the shuffled candidate order is the only fairness mechanism.
pub fn place_assignments<R: Rng + ?Sized>(
    term: &Term,
    assignments: &[TrainerAssignment],
    candidates: &[CandidateSlot],
    rooms: &[Room],
    sessions_per_week: u8,
    rng: &mut R,
) -> PlacementOutcome {
    let target = sessions_per_week as u32;
    let day_variety_target = (sessions_per_week as usize).min(term.working_days.len());

    let mut index = ConflictIndex::new();
    let mut outcome = PlacementOutcome {
        slots: Vec::new(),
        skipped: Vec::new(),
    };

    for assignment in assignments {
        let mut scheduled: u32 = 0;
        let mut days_used: HashSet<DayOfWeek> = HashSet::new();

        // Pass 1: spread across distinct days while variety is achievable.
        for candidate in candidates {
            if scheduled >= target {
                break;
            }
            if days_used.contains(&candidate.day) && days_used.len() < day_variety_target {
                continue;
            }
            if let Some(slot) = try_place(term, assignment, *candidate, rooms, &mut index, rng) {
                days_used.insert(candidate.day);
                scheduled += 1;
                outcome.slots.push(slot);
            }
        }

        // Pass 2: pack the remainder, allowing repeated days.
        if scheduled < target {
            for candidate in candidates {
                if scheduled >= target {
                    break;
                }
                if let Some(slot) = try_place(term, assignment, *candidate, rooms, &mut index, rng)
                {
                    days_used.insert(candidate.day);
                    scheduled += 1;
                    outcome.slots.push(slot);
                }
            }
        }

        if scheduled < target {
            outcome.skipped.push(SkippedAssignment {
                assignment_id: assignment.id,
                trainer_id: assignment.trainer_id,
                class_id: assignment.class_id,
                subject_id: assignment.subject_id,
                scheduled,
                requested: target,
                reason: format!(
                    "Only {} of {} sessions could be placed without conflicts",
                    scheduled, target
                ),
            });
        }
    }

    outcome
}

/// Attempt one placement: the trainer and class must be free at the
/// candidate (day, period), and at least one room must be free there. The
/// room is picked uniformly at random from the free ones.
fn try_place<R: Rng + ?Sized>(
    term: &Term,
    assignment: &TrainerAssignment,
    candidate: CandidateSlot,
    rooms: &[Room],
    index: &mut ConflictIndex,
    rng: &mut R,
) -> Option<NewTimetableSlot> {
    if !index.is_trainer_free(candidate.day, candidate.period_id, assignment.trainer_id)
        || !index.is_class_free(candidate.day, candidate.period_id, assignment.class_id)
    {
        return None;
    }

    let free_rooms: Vec<&Room> = rooms
        .iter()
        .filter(|room| index.is_room_free(candidate.day, candidate.period_id, room.id))
        .collect();
    let room = free_rooms.choose(rng)?;

    index.mark_used(
        candidate.day,
        candidate.period_id,
        room.id,
        assignment.trainer_id,
        assignment.class_id,
    );

    Some(NewTimetableSlot {
        term_id: term.id,
        class_id: assignment.class_id,
        subject_id: assignment.subject_id,
        trainer_id: assignment.trainer_id,
        room_id: room.id,
        period_id: candidate.period_id,
        day_of_week: candidate.day,
        status: SlotStatus::Scheduled,
        is_online_session: false,
    })
}
