//! HTTP surface of the StudySphere backend
//!
//! Exposes code issuance and verification under `/email` and profile
//! registration under `/students`, `/faculty` and `/alumni`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
