//! Timetable generation and conflict-resolution engine.
//!
//! This module takes a term's trainer-subject-class assignments and produces
//! a conflict-free weekly schedule with randomized greedy placement. It also
//! hosts the point validation reused when a single slot is manually created
//! or rescheduled.
//!
//! Pipeline for one generation run: [`candidates`] enumerates and shuffles
//! the (day, period) universe, the [`guard`] authorizes (and, on
//! regeneration, wipes) the term's existing slots, and [`greedy`] places
//! every assignment against a run-scoped [`ConflictIndex`]. The accepted
//! slots are persisted in one batch by the caller.

pub mod candidates;
pub mod conflict;
pub mod error;
pub mod greedy;
pub mod guard;
pub mod validator;

pub use candidates::{enumerate_candidates, CandidateSlot};
pub use conflict::ConflictIndex;
pub use error::{GenerationError, GenerationResult, SlotConflict};
pub use greedy::{place_assignments, PlacementOutcome, SkippedAssignment};
pub use guard::{GuardDecision, REGENERATION_WINDOW_DAYS};
pub use validator::{point_conflict, validate_slot, SlotValidationError};
