//! Type definitions shared by every layer

pub mod response;

pub use response::{ApiResponse, HealthResponse, ResponseStatus};
