//! # TTA Rust Backend
//!
//! Timetable generation and conflict-resolution engine.
//!
//! This crate provides the Rust backend for the Trainer Time & Attendance
//! (TTA) platform: it turns a term's catalog (classes, subjects, trainers,
//! rooms, lesson periods) into a conflict-free weekly timetable, validates
//! manual edits against that timetable, and feeds the attendance check-in
//! flow. The backend exposes a REST API via Axum for the platform frontend.
//!
//! ## Features
//!
//! - **Generation**: Two-pass greedy placement of trainer assignments into
//!   (day, period, room) slots, spreading sessions across distinct days
//! - **Conflict Validation**: Room and trainer double-booking checks for
//!   both batch generation and single manual edits
//! - **Regeneration Guard**: Existing timetables are only wiped on explicit
//!   request, inside a bounded window after term start
//! - **Attendance Feed**: Per-trainer daily session list with check-in
//!   windows
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Core entity types and identifiers
//! - [`models`]: Small domain primitives shared across layers
//! - [`scheduler`]: Candidate enumeration, greedy placement, conflict
//!   checks, and the regeneration guard
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: High-level orchestration and read models
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
