//! Assignment repository trait for scheduling demand.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ClassId, SubjectId, TermId, TrainerAssignment};

/// Repository trait for class-subject links and trainer assignments.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Check whether a (class, subject, term) relationship exists.
    ///
    /// A timetable slot may only reference triples declared this way.
    async fn class_subject_exists(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        term_id: TermId,
    ) -> RepositoryResult<bool>;

    /// List the active trainer assignments for a term: the demand a
    /// generation run must satisfy.
    ///
    /// # Returns
    /// * `Ok(Vec<TrainerAssignment>)` - Active assignments, in stored order
    async fn list_active_assignments(
        &self,
        term_id: TermId,
    ) -> RepositoryResult<Vec<TrainerAssignment>>;
}
