//! Capability checks for timetable management.
//!
//! Identity and session management live upstream; by the time a request
//! reaches this crate it carries a resolved staff role. Every mutating
//! timetable entry point funnels through the same predicate instead of
//! re-deriving the admin check ad hoc.

use std::str::FromStr;

/// Staff roles recognized by the timetable endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    Admin,
    TimetableAdmin,
    Trainer,
    Staff,
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "timetable_admin" | "timetable-admin" => Ok(Self::TimetableAdmin),
            "trainer" => Ok(Self::Trainer),
            "staff" => Ok(Self::Staff),
            _ => Err(format!("Unknown staff role: {}", s)),
        }
    }
}

/// Whether this role may generate timetables and create, move or delete
/// slots manually.
pub fn can_manage_timetable(role: StaffRole) -> bool {
    matches!(role, StaffRole::Admin | StaffRole::TimetableAdmin)
}
