//! Shared fixtures and helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};

use tta_rust::api::{
    AssignmentId, ClassGroup, ClassId, ClassSubject, LessonPeriod, PeriodId, Room, RoomId, Subject,
    SubjectId, Term, TermId, Trainer, TrainerAssignment, TrainerId,
};
use tta_rust::db::repositories::LocalRepository;
use tta_rust::models::DayOfWeek;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entity fixtures
// ─────────────────────────────────────────────────────────────────────────────

pub fn day(index: u8) -> DayOfWeek {
    DayOfWeek::new(index).expect("valid day index")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A 120-day term starting 2025-02-01 (a Saturday), active by default.
pub fn term(id: i64, working_days: &[u8]) -> Term {
    term_starting(id, working_days, date(2025, 2, 1))
}

pub fn term_starting(id: i64, working_days: &[u8], start: NaiveDate) -> Term {
    Term {
        id: TermId::new(id),
        name: format!("Term {}", id),
        start_date: start,
        end_date: start + chrono::Duration::days(120),
        working_days: working_days.iter().map(|&d| day(d)).collect(),
        holidays: vec![],
        active: true,
    }
}

pub fn class(id: i64, name: &str) -> ClassGroup {
    ClassGroup {
        id: ClassId::new(id),
        name: name.to_string(),
        department: "CS".to_string(),
        active: true,
    }
}

pub fn subject(id: i64, name: &str, can_be_online: bool) -> Subject {
    Subject {
        id: SubjectId::new(id),
        name: name.to_string(),
        department: "CS".to_string(),
        credit_hours: 3,
        can_be_online,
    }
}

pub fn trainer(id: i64, name: &str) -> Trainer {
    Trainer {
        id: TrainerId::new(id),
        name: name.to_string(),
    }
}

pub fn room(id: i64, name: &str) -> Room {
    Room {
        id: RoomId::new(id),
        name: name.to_string(),
        capacity: 30,
        room_type: "classroom".to_string(),
        active: true,
    }
}

/// A one-hour lesson period starting at `start_hour`:00.
pub fn period(id: i64, start_hour: u32) -> LessonPeriod {
    LessonPeriod {
        id: PeriodId::new(id),
        name: format!("Period {}", id),
        start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).expect("valid time"),
        end_time: NaiveTime::from_hms_opt(start_hour + 1, 0, 0).expect("valid time"),
        duration_minutes: 60,
        active: true,
    }
}

pub fn link(class_id: i64, subject_id: i64, term_id: i64) -> ClassSubject {
    ClassSubject {
        class_id: ClassId::new(class_id),
        subject_id: SubjectId::new(subject_id),
        term_id: TermId::new(term_id),
    }
}

pub fn assignment(
    id: i64,
    trainer_id: i64,
    class_id: i64,
    subject_id: i64,
    term_id: i64,
) -> TrainerAssignment {
    TrainerAssignment {
        id: AssignmentId::new(id),
        trainer_id: TrainerId::new(trainer_id),
        class_id: ClassId::new(class_id),
        subject_id: SubjectId::new(subject_id),
        term_id: TermId::new(term_id),
        active: true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composite repositories
// ─────────────────────────────────────────────────────────────────────────────

/// A repository seeded with term 1 over `working_days`, `period_count`
/// one-hour periods starting at 08:00, `room_count` rooms, one class, one
/// subject, one trainer, and one active assignment (class 1, subject 1,
/// trainer 1) linked for the term.
pub fn single_assignment_repo(
    working_days: &[u8],
    period_count: i64,
    room_count: i64,
) -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_term(term(1, working_days));
    repo.add_class(class(1, "CS-A"));
    repo.add_subject(subject(1, "Databases", true));
    repo.add_trainer(trainer(1, "R. Vance"));
    for i in 1..=room_count {
        repo.add_room(room(i, &format!("Room {}", i)));
    }
    for i in 1..=period_count {
        repo.add_period(period(i, 7 + i as u32));
    }
    repo.add_class_subject(link(1, 1, 1));
    repo.add_assignment(assignment(1, 1, 1, 1, 1));
    repo
}
