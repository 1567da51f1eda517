//! Weekly timetable read model.
//!
//! Projects a term's persisted slots into the grid the frontend renders:
//! one entry per working day in the term's configured order, slots within a
//! day ordered by start time, every id resolved to a display name.

use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::api::{
    ClassId, PeriodId, RoomId, SlotId, SlotStatus, SubjectId, TermId, TrainerId,
};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::DayOfWeek;

/// One slot with every reference resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub slot_id: SlotId,
    pub class_id: ClassId,
    pub class_name: String,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub trainer_id: TrainerId,
    pub trainer_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub period_id: PeriodId,
    pub period_name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub status: SlotStatus,
    pub is_online_session: bool,
}

/// All slots of one day, ordered by start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub day_name: String,
    pub slots: Vec<SlotView>,
}

/// The full weekly grid for a term.
///
/// Days follow the term's working-day order; a working day without slots
/// still appears, with an empty list. Slots manually placed on a
/// non-working day are appended after the working days so nothing persisted
/// is hidden from operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTimetable {
    pub term_id: TermId,
    pub term_name: String,
    pub days: Vec<DaySchedule>,
}

/// Build the weekly grid for a term.
///
/// # Returns
/// * `Err(RepositoryError::NotFound)` - If the term doesn't exist
pub async fn weekly_timetable<R: FullRepository + ?Sized>(
    repo: &R,
    term_id: TermId,
) -> RepositoryResult<WeeklyTimetable> {
    let term = repo.get_term(term_id).await?;
    let slots = repo.list_slots(term_id).await?;

    let mut by_day: HashMap<DayOfWeek, Vec<SlotView>> = HashMap::new();
    for slot in slots {
        let class = repo.get_class(slot.class_id).await?;
        let subject = repo.get_subject(slot.subject_id).await?;
        let trainer = repo.get_trainer(slot.trainer_id).await?;
        let room = repo.get_room(slot.room_id).await?;
        let period = repo.get_period(slot.period_id).await?;

        by_day.entry(slot.day_of_week).or_default().push(SlotView {
            slot_id: slot.id,
            class_id: slot.class_id,
            class_name: class.name,
            subject_id: slot.subject_id,
            subject_name: subject.name,
            trainer_id: slot.trainer_id,
            trainer_name: trainer.name,
            room_id: slot.room_id,
            room_name: room.name,
            period_id: slot.period_id,
            period_name: period.name,
            starts_at: period.start_time,
            ends_at: period.end_time,
            status: slot.status,
            is_online_session: slot.is_online_session,
        });
    }

    // Working days first, in the term's configured order, then any day that
    // only holds manually placed slots.
    let mut day_order: Vec<DayOfWeek> = Vec::new();
    let mut seen: HashSet<DayOfWeek> = HashSet::new();
    for day in &term.working_days {
        if seen.insert(*day) {
            day_order.push(*day);
        }
    }
    let mut strays: Vec<DayOfWeek> = by_day
        .keys()
        .copied()
        .filter(|day| !seen.contains(day))
        .collect();
    strays.sort_by_key(|day| day.index());
    day_order.extend(strays);

    let days = day_order
        .into_iter()
        .map(|day| {
            let mut slots = by_day.remove(&day).unwrap_or_default();
            slots.sort_by(|a, b| {
                a.starts_at
                    .cmp(&b.starts_at)
                    .then_with(|| a.room_name.cmp(&b.room_name))
            });
            DaySchedule {
                day,
                day_name: day.name().to_string(),
                slots,
            }
        })
        .collect();

    Ok(WeeklyTimetable {
        term_id: term.id,
        term_name: term.name,
        days,
    })
}
