//! Regeneration policy gate.

use chrono::NaiveDate;
use log::info;

use crate::api::Term;
use crate::db::repository::FullRepository;

use super::error::{GenerationError, GenerationResult};

/// Days after term start during which an existing timetable may be wiped.
pub const REGENERATION_WINDOW_DAYS: i64 = 14;

/// What the guard authorized for this generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// No slots exist for the term; generate normally.
    FirstGeneration,
    /// Existing slots must be (or have been) wiped before generating.
    WipeAndRegenerate,
}

/// Pure decision: may generation proceed for a term that currently has
/// `existing_slots` persisted slots?
///
/// `regenerate=false` with existing slots is rejected outright. With
/// `regenerate=true`, wiping is allowed only while the number of whole days
/// elapsed since the term start is at most [`REGENERATION_WINDOW_DAYS`];
/// a term that has not started yet is always within the window.
pub fn decide(
    term: &Term,
    existing_slots: usize,
    regenerate: bool,
    today: NaiveDate,
) -> GenerationResult<GuardDecision> {
    if existing_slots == 0 {
        return Ok(GuardDecision::FirstGeneration);
    }
    if !regenerate {
        return Err(GenerationError::TimetableExists(term.id));
    }

    let days_elapsed = (today - term.start_date).num_days();
    if days_elapsed > REGENERATION_WINDOW_DAYS {
        return Err(GenerationError::RegenerationWindowExpired {
            term_id: term.id,
            days_elapsed,
        });
    }

    Ok(GuardDecision::WipeAndRegenerate)
}

/// Apply the guard against the store: count the term's persisted slots,
/// decide, and perform the bulk delete when regeneration was authorized.
/// The delete is all-or-nothing; a rejected request never mutates the store.
pub async fn enforce<R: FullRepository + ?Sized>(
    repo: &R,
    term: &Term,
    regenerate: bool,
    today: NaiveDate,
) -> GenerationResult<GuardDecision> {
    let existing = repo.count_slots(term.id).await?;
    let decision = decide(term, existing, regenerate, today)?;

    if decision == GuardDecision::WipeAndRegenerate {
        let deleted = repo.delete_slots_for_term(term.id).await?;
        info!(
            "Regeneration guard: wiped {} existing slots for term {}",
            deleted, term.id
        );
    }

    Ok(decision)
}
