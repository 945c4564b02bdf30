//! triage-server: HTTP API server for the Railway Complaint Triage service
//!
//! This crate provides:
//! - Passenger endpoints (submit a complaint, check its status)
//! - Staff endpoints (login, list all complaints, update triage state)
//! - Static file serving for the web frontend
//!
//! # Architecture
//!
//! The server is built on Axum. Model artifacts are loaded once at
//! startup into shared immutable state; inference is a pure function over
//! that state and runs concurrently without locking. The complaint
//! ledger and credential store are file-backed and serialized by
//! in-process locks.
//!
//! Startup is fail-fast: a missing JWT secret or missing/mismatched
//! model artifacts prevent the server from starting at all, so it never
//! serves unclassified requests.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
