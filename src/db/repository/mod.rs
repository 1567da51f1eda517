//! Repository trait definitions for store operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract the relational store. By splitting responsibilities across
//! multiple traits, implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`catalog`]: Read access to terms, classes, subjects, rooms, periods
//! - [`assignments`]: Class-subject links and trainer assignments (demand)
//! - [`slots`]: Timetable slot reads and writes (supply)
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let term = repo.get_term(term_id).await?;
//!     let slots = repo.list_slots(term.id).await?;
//!     Ok(())
//! }
//! ```

pub mod assignments;
pub mod catalog;
pub mod error;
pub mod slots;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use assignments::AssignmentRepository;
pub use catalog::CatalogRepository;
pub use slots::SlotRepository;

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// all three repository traits. Use this as a convenient bound when you
/// need access to all repository operations.
pub trait FullRepository: CatalogRepository + AssignmentRepository + SlotRepository {}

// Blanket implementation: any type implementing all three traits automatically implements FullRepository
impl<T> FullRepository for T where T: CatalogRepository + AssignmentRepository + SlotRepository {}
