//! Timetable generation orchestration.
//!
//! Ties the scheduling pipeline together over a repository: validate the
//! request, check catalog preconditions, apply the regeneration guard, run
//! the two-pass placement, and persist the accepted slots in one batch.
//! Every failure before the guard's wipe leaves the store untouched.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::api::{TermId, TimetableSlot, TrainerAssignment};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::scheduler::{
    enumerate_candidates, guard, place_assignments, GenerationError, GenerationResult,
    SkippedAssignment,
};

// ==================== Request & Report ====================

/// Parameters for a generation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Sessions to place per assignment per week, between 1 and 5.
    pub sessions_per_week: u8,
    /// Accepted and validated, but does not currently constrain placement;
    /// it is recorded for operators tuning the catalog.
    pub min_classes_per_day: u8,
    /// When true, an existing timetable may be wiped and rebuilt, subject
    /// to the regeneration window.
    #[serde(default)]
    pub regenerate: bool,
}

impl GenerationRequest {
    pub fn validate(&self) -> GenerationResult<()> {
        if !(1..=5).contains(&self.sessions_per_week) {
            return Err(GenerationError::InvalidSessionsPerWeek(
                self.sessions_per_week,
            ));
        }
        if self.min_classes_per_day < 1 {
            return Err(GenerationError::InvalidMinClassesPerDay(
                self.min_classes_per_day,
            ));
        }
        Ok(())
    }
}

/// Aggregate counters for a completed generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub slots_created: usize,
    pub assignments_total: usize,
    /// Assignments that received every requested session.
    pub assignments_full: usize,
    /// Assignments that fell short and appear in `skipped`.
    pub assignments_partial: usize,
    pub trainers_used: usize,
    pub rooms_used: usize,
    pub subjects_scheduled: usize,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub message: String,
    pub stats: GenerationStats,
    /// One entry per under-scheduled assignment, with placed and requested
    /// session counts.
    pub skipped: Vec<SkippedAssignment>,
}

// ==================== Orchestration ====================

/// Generate the weekly timetable for a term.
///
/// Uses the current date for the regeneration window and an OS-seeded RNG
/// for placement. See [`generate_timetable_with`] for the full pipeline.
pub async fn generate_timetable<R: FullRepository + ?Sized>(
    repo: &R,
    term_id: TermId,
    request: &GenerationRequest,
) -> GenerationResult<GenerationReport> {
    let mut rng = SmallRng::from_os_rng();
    let today = Utc::now().date_naive();
    generate_timetable_with(repo, term_id, request, today, &mut rng).await
}

/// Generate the weekly timetable for a term with an explicit date and RNG.
///
/// Pipeline:
/// 1. Validate request parameters.
/// 2. Load the term and check catalog preconditions (active rooms, active
///    periods, active assignments, working days).
/// 3. Apply the regeneration guard; an authorized rebuild wipes the term's
///    existing slots here, after every pure validation has passed.
/// 4. Run two-pass placement over the shuffled candidate slots.
/// 5. Persist the accepted slots in a single all-or-nothing batch.
///
/// # Returns
/// * `Ok(GenerationReport)` - Stats plus any under-scheduled assignments
/// * `Err(GenerationError)` - The request was rejected; when the guard
///   authorized a wipe, the wipe is the only mutation that may have occurred
pub async fn generate_timetable_with<R, G>(
    repo: &R,
    term_id: TermId,
    request: &GenerationRequest,
    today: NaiveDate,
    rng: &mut G,
) -> GenerationResult<GenerationReport>
where
    R: FullRepository + ?Sized,
    G: Rng,
{
    request.validate()?;

    let term = match repo.get_term(term_id).await {
        Ok(term) => term,
        Err(RepositoryError::NotFound { .. }) => {
            return Err(GenerationError::TermNotFound(term_id))
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Generating timetable for term {} ({}): sessions_per_week={}, min_classes_per_day={}, regenerate={}",
        term.id, term.name, request.sessions_per_week, request.min_classes_per_day, request.regenerate
    );

    let rooms = repo.list_active_rooms().await?;
    if rooms.is_empty() {
        return Err(GenerationError::NoActiveRooms);
    }
    let periods = repo.list_active_periods().await?;
    if periods.is_empty() {
        return Err(GenerationError::NoActivePeriods);
    }
    let assignments = repo.list_active_assignments(term.id).await?;
    if assignments.is_empty() {
        return Err(GenerationError::NoAssignments(term.id));
    }

    // Fails fast on empty working days, before the guard may wipe.
    let candidates = enumerate_candidates(&term, &periods, rng)?;

    guard::enforce(repo, &term, request.regenerate, today).await?;

    let outcome = place_assignments(
        &term,
        &assignments,
        &candidates,
        &rooms,
        request.sessions_per_week,
        rng,
    );

    let persisted = repo.insert_slots_batch(term.id, outcome.slots).await?;
    let stats = compute_stats(&persisted, &assignments, &outcome.skipped);

    if !outcome.skipped.is_empty() {
        warn!(
            "Term {}: {} of {} assignments under-scheduled",
            term.id, stats.assignments_partial, stats.assignments_total
        );
    }
    info!(
        "Term {}: generated {} slots across {} rooms and {} trainers",
        term.id, stats.slots_created, stats.rooms_used, stats.trainers_used
    );

    let message = format!(
        "Timetable generated for term {}: {} slots created, {} of {} assignments fully scheduled",
        term.name, stats.slots_created, stats.assignments_full, stats.assignments_total
    );
    Ok(GenerationReport {
        message,
        stats,
        skipped: outcome.skipped,
    })
}

fn compute_stats(
    persisted: &[TimetableSlot],
    assignments: &[TrainerAssignment],
    skipped: &[SkippedAssignment],
) -> GenerationStats {
    let trainers: HashSet<_> = persisted.iter().map(|s| s.trainer_id).collect();
    let rooms: HashSet<_> = persisted.iter().map(|s| s.room_id).collect();
    let subjects: HashSet<_> = persisted.iter().map(|s| s.subject_id).collect();

    GenerationStats {
        slots_created: persisted.len(),
        assignments_total: assignments.len(),
        assignments_full: assignments.len().saturating_sub(skipped.len()),
        assignments_partial: skipped.len(),
        trainers_used: trainers.len(),
        rooms_used: rooms.len(),
        subjects_scheduled: subjects.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bounds() {
        let ok = GenerationRequest {
            sessions_per_week: 3,
            min_classes_per_day: 1,
            regenerate: false,
        };
        assert!(ok.validate().is_ok());

        let zero = GenerationRequest {
            sessions_per_week: 0,
            ..ok
        };
        assert!(matches!(
            zero.validate(),
            Err(GenerationError::InvalidSessionsPerWeek(0))
        ));

        let six = GenerationRequest {
            sessions_per_week: 6,
            ..ok
        };
        assert!(matches!(
            six.validate(),
            Err(GenerationError::InvalidSessionsPerWeek(6))
        ));

        let no_min = GenerationRequest {
            min_classes_per_day: 0,
            ..ok
        };
        assert!(matches!(
            no_min.validate(),
            Err(GenerationError::InvalidMinClassesPerDay(0))
        ));
    }

    #[test]
    fn test_stats_from_outcome() {
        use crate::api::*;
        use crate::models::DayOfWeek;

        let slot = |id: i64, trainer: i64, room: i64, subject: i64| TimetableSlot {
            id: SlotId::new(id),
            term_id: TermId::new(1),
            class_id: ClassId::new(1),
            subject_id: SubjectId::new(subject),
            trainer_id: TrainerId::new(trainer),
            room_id: RoomId::new(room),
            period_id: PeriodId::new(1),
            day_of_week: DayOfWeek::new(1).unwrap(),
            status: SlotStatus::Scheduled,
            is_online_session: false,
        };
        let assignment = |id: i64| TrainerAssignment {
            id: AssignmentId::new(id),
            trainer_id: TrainerId::new(id),
            class_id: ClassId::new(1),
            subject_id: SubjectId::new(id),
            term_id: TermId::new(1),
            active: true,
        };

        let persisted = vec![slot(1, 1, 1, 1), slot(2, 1, 2, 1), slot(3, 2, 1, 2)];
        let assignments = vec![assignment(1), assignment(2)];
        let skipped = vec![SkippedAssignment {
            assignment_id: AssignmentId::new(2),
            trainer_id: TrainerId::new(2),
            class_id: ClassId::new(1),
            subject_id: SubjectId::new(2),
            scheduled: 1,
            requested: 2,
            reason: "Only 1 of 2 sessions could be placed without conflicts".to_string(),
        }];

        let stats = compute_stats(&persisted, &assignments, &skipped);
        assert_eq!(stats.slots_created, 3);
        assert_eq!(stats.assignments_total, 2);
        assert_eq!(stats.assignments_full, 1);
        assert_eq!(stats.assignments_partial, 1);
        assert_eq!(stats.trainers_used, 2);
        assert_eq!(stats.rooms_used, 2);
        assert_eq!(stats.subjects_scheduled, 2);
    }
}
