use actix_web::{web, HttpResponse};

use ss_core::{NotifierTrait, ProfileRepository, VerificationStore};
use ss_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::handle_domain_error;

use super::{role_for_collection, unknown_collection};

/// Handler for GET /{collection}/{id}
///
/// Returns the profile without its password hash, or 404.
pub async fn fetch_profile<P, S, N>(
    state: web::Data<AppState<P, S, N>>,
    path: web::Path<(String, i64)>,
) -> HttpResponse
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    let (collection, id) = path.into_inner();
    let Some(role_type) = role_for_collection(&collection) else {
        return unknown_collection(&collection);
    };

    match state.registration_service.fetch(role_type, id).await {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(profile)),
        Err(error) => handle_domain_error(error),
    }
}
