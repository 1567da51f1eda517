//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Mutating endpoints require a staff
//! role that passes the capability gate; the role arrives in the
//! `x-staff-role` header, resolved by the platform upstream.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::dto::{
    CreateSlotRequest, GenerationReport, GenerationRequest, HealthResponse, SlotUpdate,
    TimetableSlot, TrainerTodayResponse, WeeklyTimetable,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{SlotId, TermId, TrainerId};
use crate::services::{attendance, generation, slots as slot_services, views};
use crate::services::{can_manage_timetable, StaffRole};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const STAFF_ROLE_HEADER: &str = "x-staff-role";

fn require_timetable_manager(headers: &HeaderMap) -> Result<StaffRole, AppError> {
    let raw = headers
        .get(STAFF_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Forbidden(format!("Missing {} header", STAFF_ROLE_HEADER)))?;
    let role: StaffRole = raw.parse().map_err(AppError::Forbidden)?;
    if !can_manage_timetable(role) {
        return Err(AppError::Forbidden(format!(
            "Staff role '{}' may not manage timetables",
            raw
        )));
    }
    Ok(role)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Timetable Generation & View
// =============================================================================

/// POST /v1/terms/{term_id}/timetable/generate
///
/// Generate (or regenerate) the weekly timetable for a term. Requires a
/// timetable-managing role.
pub async fn generate_timetable(
    State(state): State<AppState>,
    Path(term_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<GenerationRequest>,
) -> HandlerResult<GenerationReport> {
    require_timetable_manager(&headers)?;
    let term_id = TermId::new(term_id);

    // One id per run so a wipe and its rebuild correlate in the logs.
    let run_id = Uuid::new_v4();
    info!(
        "Generation run {} requested for term {} (regenerate={})",
        run_id, term_id, request.regenerate
    );

    let report =
        generation::generate_timetable(state.repository.as_ref(), term_id, &request).await?;

    info!("Generation run {} finished: {}", run_id, report.message);
    Ok(Json(report))
}

/// GET /v1/terms/{term_id}/timetable
///
/// The full weekly grid for a term, grouped per working day.
pub async fn get_weekly_timetable(
    State(state): State<AppState>,
    Path(term_id): Path<i64>,
) -> HandlerResult<WeeklyTimetable> {
    let view = views::weekly_timetable(state.repository.as_ref(), TermId::new(term_id)).await?;
    Ok(Json(view))
}

// =============================================================================
// Manual Slot Management
// =============================================================================

/// POST /v1/terms/{term_id}/slots
///
/// Create one slot manually. The slot is validated against the existing
/// timetable before insertion.
pub async fn create_slot(
    State(state): State<AppState>,
    Path(term_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<TimetableSlot>), AppError> {
    require_timetable_manager(&headers)?;
    let slot = request.into_new_slot(TermId::new(term_id));
    let persisted = slot_services::create_slot(state.repository.as_ref(), slot).await?;
    Ok((StatusCode::CREATED, Json(persisted)))
}

/// PUT /v1/slots/{slot_id}
///
/// Apply a partial update (move, online toggle, status change) to a slot,
/// re-validating the result with the slot's own row excluded.
pub async fn update_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
    headers: HeaderMap,
    Json(changes): Json<SlotUpdate>,
) -> HandlerResult<TimetableSlot> {
    require_timetable_manager(&headers)?;
    let persisted =
        slot_services::update_slot(state.repository.as_ref(), SlotId::new(slot_id), &changes)
            .await?;
    Ok(Json(persisted))
}

/// DELETE /v1/slots/{slot_id}
pub async fn delete_slot(
    State(state): State<AppState>,
    Path(slot_id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    require_timetable_manager(&headers)?;
    slot_services::delete_slot(state.repository.as_ref(), SlotId::new(slot_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Trainer Attendance Feed
// =============================================================================

/// GET /v1/trainers/{trainer_id}/slots/today
///
/// Today's sessions for a trainer in the active term, each annotated with
/// its check-in window.
pub async fn get_trainer_today(
    State(state): State<AppState>,
    Path(trainer_id): Path<i64>,
) -> HandlerResult<TrainerTodayResponse> {
    let today = Utc::now().date_naive();
    let slots = attendance::trainer_slots_today(
        state.repository.as_ref(),
        TrainerId::new(trainer_id),
        today,
        &state.checkin_window,
    )
    .await?;

    Ok(Json(TrainerTodayResponse { date: today, slots }))
}
