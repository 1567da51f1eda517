//! HTTP-level integration tests. Requests are sent straight to the router
//! via tower::ServiceExt, with no TCP listener.

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tta_rust::api::{NewTimetableSlot, SlotStatus, TermId};
use tta_rust::db::repositories::LocalRepository;
use tta_rust::db::repository::{FullRepository, SlotRepository};
use tta_rust::http::{create_router, AppState};
use tta_rust::services::CheckinWindow;

use support::{assignment, class, link, subject, trainer};

fn build_app(repo: LocalRepository) -> Router {
    let repo = Arc::new(repo) as Arc<dyn FullRepository>;
    let state = AppState::with_checkin_window(repo, CheckinWindow::default());
    create_router(state)
}

fn request(method: Method, uri: &str, role: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header("x-staff-role", role);
    }
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("request should complete")
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_app(LocalRepository::new());

    let response = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "v1");
    assert_eq!(json["repository"], "connected");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = build_app(LocalRepository::new());
    let response = send(&app, request(Method::GET, "/v1/nope", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation endpoint
// ─────────────────────────────────────────────────────────────────────────────

fn generation_body() -> Value {
    json!({ "sessions_per_week": 2, "min_classes_per_day": 1 })
}

#[tokio::test]
async fn test_generate_requires_manager_role() {
    let repo = support::single_assignment_repo(&[1, 2, 3], 2, 1);
    let app = build_app(repo);
    let uri = "/v1/terms/1/timetable/generate";

    // No role header at all.
    let response = send(&app, request(Method::POST, uri, None, Some(generation_body()))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A trainer cannot generate timetables.
    let response = send(
        &app,
        request(Method::POST, uri, Some("trainer"), Some(generation_body())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_generate_and_fetch_weekly_timetable() {
    let repo = support::single_assignment_repo(&[1, 2, 3], 2, 1);
    let app = build_app(repo);

    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/1/timetable/generate",
            Some("admin"),
            Some(generation_body()),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["stats"]["slots_created"], 2);
    assert_eq!(report["stats"]["assignments_full"], 1);
    assert_eq!(report["skipped"].as_array().unwrap().len(), 0);

    let response = send(&app, request(Method::GET, "/v1/terms/1/timetable", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let timetable = body_json(response).await;
    assert_eq!(timetable["term_id"], 1);

    // One entry per working day, in the term's configured order.
    let days = timetable["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["day"], 1);
    assert_eq!(days[0]["day_name"], "Monday");

    let total: usize = days
        .iter()
        .map(|d| d["slots"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 2);

    // Every rendered slot resolves its display names.
    let with_slots = days
        .iter()
        .find(|d| !d["slots"].as_array().unwrap().is_empty())
        .unwrap();
    let slot = &with_slots["slots"][0];
    assert_eq!(slot["class_name"], "CS-A");
    assert_eq!(slot["subject_name"], "Databases");
    assert_eq!(slot["trainer_name"], "R. Vance");
}

#[tokio::test]
async fn test_generate_twice_returns_conflict() {
    let repo = support::single_assignment_repo(&[1, 2, 3], 2, 1);
    let app = build_app(repo);
    let uri = "/v1/terms/1/timetable/generate";

    let response = send(&app, request(Method::POST, uri, Some("admin"), Some(generation_body()))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request(Method::POST, uri, Some("admin"), Some(generation_body()))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_regenerate_long_after_term_start_conflicts() {
    // The fixture term started 2025-02-01, far outside the two-week window
    // by now.
    let repo = support::single_assignment_repo(&[1, 2, 3], 2, 1);
    let app = build_app(repo);
    let uri = "/v1/terms/1/timetable/generate";

    let response = send(&app, request(Method::POST, uri, Some("admin"), Some(generation_body()))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({ "sessions_per_week": 2, "min_classes_per_day": 1, "regenerate": true });
    let response = send(&app, request(Method::POST, uri, Some("admin"), Some(body))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("more than 2 weeks since term start"));
}

#[tokio::test]
async fn test_generate_unknown_term_returns_404() {
    let app = build_app(support::single_assignment_repo(&[1], 1, 1));

    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/99/timetable/generate",
            Some("admin"),
            Some(generation_body()),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fetch_timetable_unknown_term_returns_404() {
    let app = build_app(support::single_assignment_repo(&[1], 1, 1));
    let response = send(&app, request(Method::GET, "/v1/terms/99/timetable", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─────────────────────────────────────────────────────────────────────────────
// Manual slot endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog with two linked class/subject pairs and two trainers, no slots.
fn manual_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_term(support::term(1, &[1, 2, 3, 4, 5]));
    repo.add_class(class(1, "CS-A"));
    repo.add_class(class(2, "CS-B"));
    repo.add_subject(subject(1, "Databases", true));
    repo.add_subject(subject(2, "Networks", false));
    repo.add_trainer(trainer(1, "R. Vance"));
    repo.add_trainer(trainer(2, "M. Osei"));
    repo.add_room(support::room(1, "Room 1"));
    repo.add_period(support::period(1, 8));
    repo.add_class_subject(link(1, 1, 1));
    repo.add_class_subject(link(2, 2, 1));
    repo
}

fn manual_slot_body(class: i64, subject: i64, trainer: i64) -> Value {
    json!({
        "class_id": class,
        "subject_id": subject,
        "trainer_id": trainer,
        "room_id": 1,
        "period_id": 1,
        "day_of_week": 1,
    })
}

#[tokio::test]
async fn test_manual_slot_lifecycle() {
    let app = build_app(manual_repo());

    // Create.
    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/1/slots",
            Some("timetable_admin"),
            Some(manual_slot_body(1, 1, 1)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let slot_id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "scheduled");

    // Toggle online delivery.
    let response = send(
        &app,
        request(
            Method::PUT,
            &format!("/v1/slots/{}", slot_id),
            Some("admin"),
            Some(json!({ "is_online_session": true })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["is_online_session"], true);

    // Delete, then delete again.
    let uri = format!("/v1/slots/{}", slot_id);
    let response = send(&app, request(Method::DELETE, &uri, Some("admin"), None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, request(Method::DELETE, &uri, Some("admin"), None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manual_create_conflict_returns_409_naming_the_room() {
    let app = build_app(manual_repo());

    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/1/slots",
            Some("admin"),
            Some(manual_slot_body(1, 1, 1)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same room, day, and period for the other class.
    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/1/slots",
            Some("admin"),
            Some(manual_slot_body(2, 2, 2)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Room 1"), "got: {message}");
    assert!(message.contains("class 1"), "got: {message}");
}

#[tokio::test]
async fn test_manual_slot_requires_manager_role() {
    let app = build_app(manual_repo());

    let response = send(
        &app,
        request(
            Method::POST,
            "/v1/terms/1/slots",
            Some("staff"),
            Some(manual_slot_body(1, 1, 1)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ─────────────────────────────────────────────────────────────────────────────
// Trainer attendance feed
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_trainer_today_feed() {
    let repo = manual_repo();
    // One slot on every weekday so the feed has exactly one hit no matter
    // which day the test runs on.
    for day in 0u8..7 {
        repo.insert_slot(NewTimetableSlot {
            term_id: TermId::new(1),
            class_id: tta_rust::api::ClassId::new(1),
            subject_id: tta_rust::api::SubjectId::new(1),
            trainer_id: tta_rust::api::TrainerId::new(1),
            room_id: tta_rust::api::RoomId::new(1),
            period_id: tta_rust::api::PeriodId::new(1),
            day_of_week: tta_rust::models::DayOfWeek::new(day).unwrap(),
            status: SlotStatus::Scheduled,
            is_online_session: false,
        })
        .await
        .unwrap();
    }
    let app = build_app(repo);

    let response = send(&app, request(Method::GET, "/v1/trainers/1/slots/today", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["subject_name"], "Databases");
    assert_eq!(slots[0]["starts_at"], "08:00:00");
    assert_eq!(slots[0]["checkin_opens"], "07:45:00");
    assert_eq!(slots[0]["checkin_closes"], "08:15:00");

    // A trainer with no sessions gets an empty feed.
    let response = send(&app, request(Method::GET, "/v1/trainers/2/slots/today", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["slots"].as_array().unwrap().len(), 0);
}
