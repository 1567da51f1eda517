//! Service layer: orchestration and read models over the repository.
//!
//! Handlers (HTTP or otherwise) call into these functions; the functions
//! are generic over [`FullRepository`](crate::db::repository::FullRepository)
//! so every backend gets the same business rules.

pub mod attendance;
pub mod capability;
pub mod generation;
pub mod slots;
pub mod views;

pub use attendance::{trainer_slots_today, CheckinWindow, TodaySlot};
pub use capability::{can_manage_timetable, StaffRole};
pub use generation::{
    generate_timetable, generate_timetable_with, GenerationReport, GenerationRequest,
    GenerationStats,
};
pub use slots::{create_slot, delete_slot, update_slot, SlotUpdate};
pub use views::{weekly_timetable, DaySchedule, SlotView, WeeklyTimetable};
