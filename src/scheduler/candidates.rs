//! Candidate slot enumeration for one term.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::{LessonPeriod, PeriodId, Term};
use crate::models::DayOfWeek;

use super::error::{GenerationError, GenerationResult};

/// One placeable (day, period) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub day: DayOfWeek,
    pub period_id: PeriodId,
}

/// Build the universe of (day, period) pairs usable this term: the full
/// cross-product of the term's working days and the active lesson periods,
/// shuffled with a uniform-random permutation so repeated runs do not favour
/// earlier days or periods.
///
/// Fails before any scheduling starts when either input set is empty.
pub fn enumerate_candidates<R: Rng + ?Sized>(
    term: &Term,
    periods: &[LessonPeriod],
    rng: &mut R,
) -> GenerationResult<Vec<CandidateSlot>> {
    if term.working_days.is_empty() {
        return Err(GenerationError::NoWorkingDays(term.id));
    }
    if periods.is_empty() {
        return Err(GenerationError::NoActivePeriods);
    }

    let mut candidates = Vec::with_capacity(term.working_days.len() * periods.len());
    for &day in &term.working_days {
        for period in periods {
            candidates.push(CandidateSlot {
                day,
                period_id: period.id,
            });
        }
    }
    candidates.shuffle(rng);
    Ok(candidates)
}
