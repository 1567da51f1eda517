//! Trainer-facing attendance feed.
//!
//! The attendance platform checks trainers in against the generated
//! timetable: a trainer may check into a session only inside a window
//! around the lesson period's start time. This module resolves "what can
//! trainer X check into today" from the active term and computes that
//! window per slot.

use chrono::{NaiveDate, NaiveTime, Timelike};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{SlotId, SlotStatus, TrainerId};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::DayOfWeek;

const SECONDS_PER_DAY: i64 = 86_400;

// ==================== Check-in Window ====================

/// Tolerance around a lesson period's start time inside which a trainer
/// check-in is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinWindow {
    pub minutes_before: i64,
    pub minutes_after: i64,
}

impl Default for CheckinWindow {
    fn default() -> Self {
        Self {
            minutes_before: 15,
            minutes_after: 15,
        }
    }
}

impl CheckinWindow {
    /// Reads the window from `CHECKIN_WINDOW_BEFORE_MIN` and
    /// `CHECKIN_WINDOW_AFTER_MIN`, falling back to 15 minutes on either
    /// side when a variable is unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            minutes_before: read_minutes("CHECKIN_WINDOW_BEFORE_MIN", defaults.minutes_before),
            minutes_after: read_minutes("CHECKIN_WINDOW_AFTER_MIN", defaults.minutes_after),
        }
    }

    /// Computes `[start - before, start + after]` for a session starting at
    /// `start`. Bounds saturate at midnight rather than wrapping, so an
    /// 00:05 session opens its window at 00:00, not at 23:50 the previous
    /// day.
    pub fn bounds(&self, start: NaiveTime) -> (NaiveTime, NaiveTime) {
        let start_secs = i64::from(start.num_seconds_from_midnight());
        let opens = (start_secs - self.minutes_before * 60).clamp(0, SECONDS_PER_DAY - 1);
        let closes = (start_secs + self.minutes_after * 60).clamp(0, SECONDS_PER_DAY - 1);
        (time_from_seconds(opens), time_from_seconds(closes))
    }
}

fn read_minutes(var: &str, default: i64) -> i64 {
    std::env::var(var)
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|minutes| *minutes >= 0)
        .unwrap_or(default)
}

fn time_from_seconds(secs: i64) -> NaiveTime {
    // secs is pre-clamped to [0, 86_399], so the fallback never fires.
    NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0).unwrap_or(NaiveTime::MIN)
}

// ==================== Today's Sessions ====================

/// One scheduled session for a trainer today, annotated with its check-in
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodaySlot {
    pub slot_id: SlotId,
    pub class_name: String,
    pub subject_name: String,
    pub room_name: String,
    pub period_name: String,
    pub is_online_session: bool,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub checkin_opens: NaiveTime,
    pub checkin_closes: NaiveTime,
}

/// Lists the sessions `trainer_id` teaches on `today` in the active term,
/// ordered by start time. Cancelled slots are omitted; there is nothing to
/// check into.
///
/// Returns an empty list when no term is currently active.
pub async fn trainer_slots_today<R: FullRepository + ?Sized>(
    repo: &R,
    trainer_id: TrainerId,
    today: NaiveDate,
    window: &CheckinWindow,
) -> RepositoryResult<Vec<TodaySlot>> {
    let Some(term) = repo.get_active_term().await? else {
        debug!("No active term; trainer {} has no sessions today", trainer_id);
        return Ok(Vec::new());
    };

    let day = DayOfWeek::from_date(today);
    let slots = repo
        .list_slots_for_trainer_on_day(term.id, trainer_id, day)
        .await?;

    let mut today_slots = Vec::with_capacity(slots.len());
    for slot in slots {
        if slot.status == SlotStatus::Cancelled {
            continue;
        }
        let class = repo.get_class(slot.class_id).await?;
        let subject = repo.get_subject(slot.subject_id).await?;
        let room = repo.get_room(slot.room_id).await?;
        let period = repo.get_period(slot.period_id).await?;
        let (checkin_opens, checkin_closes) = window.bounds(period.start_time);
        today_slots.push(TodaySlot {
            slot_id: slot.id,
            class_name: class.name,
            subject_name: subject.name,
            room_name: room.name,
            period_name: period.name,
            is_online_session: slot.is_online_session,
            starts_at: period.start_time,
            ends_at: period.end_time,
            checkin_opens,
            checkin_closes,
        });
    }
    today_slots.sort_by_key(|slot| slot.starts_at);

    debug!(
        "Trainer {} has {} session(s) on {}",
        trainer_id,
        today_slots.len(),
        day
    );
    Ok(today_slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_around_midmorning_start() {
        let window = CheckinWindow::default();
        let (opens, closes) = window.bounds(at(9, 0));
        assert_eq!(opens, at(8, 45));
        assert_eq!(closes, at(9, 15));
    }

    #[test]
    fn test_window_saturates_at_midnight() {
        let window = CheckinWindow {
            minutes_before: 30,
            minutes_after: 30,
        };
        let (opens, _) = window.bounds(at(0, 10));
        assert_eq!(opens, NaiveTime::MIN);

        let (_, closes) = window.bounds(at(23, 50));
        assert_eq!(closes, NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_asymmetric_window() {
        let window = CheckinWindow {
            minutes_before: 5,
            minutes_after: 45,
        };
        let (opens, closes) = window.bounds(at(14, 0));
        assert_eq!(opens, at(13, 55));
        assert_eq!(closes, at(14, 45));
    }
}
