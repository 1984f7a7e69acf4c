//! Profile routes, one collection per role type
//!
//! - `POST /students`, `POST /faculty`, `POST /alumni`
//! - `GET /students/{id}`, `GET /faculty/{id}`, `GET /alumni/{id}`

pub mod fetch;
pub mod register;

pub use fetch::fetch_profile;
pub use register::register_profile;

use actix_web::HttpResponse;

use ss_core::RoleType;
use ss_shared::{error_codes, ErrorResponse};

/// Role type served under a collection path segment
pub fn role_for_collection(collection: &str) -> Option<RoleType> {
    RoleType::ALL
        .into_iter()
        .find(|role_type| role_type.table_name() == collection)
}

fn unknown_collection(collection: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        format!("No such collection: {}", collection),
    ))
}
