use actix_web::{web, HttpResponse};
use validator::Validate;

use ss_core::{NotifierTrait, ProfileRepository, VerificationStore};
use ss_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::RegisterProfileRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::{role_for_collection, unknown_collection};

/// Handler for POST /{collection}
///
/// Creates the profile and issues a signup code linked to it. Responds
/// `201 {id, roleType, address, codeIssued}`; `codeIssued` is false when the
/// profile was stored but the code could not be, in which case the client
/// asks for a new one through `/email/request-code`.
///
/// ## Errors
/// - 400 `validation_error`
/// - 404 `not_found`: unknown collection
/// - 409 `conflict`: the address is already registered for this role
pub async fn register_profile<P, S, N>(
    state: web::Data<AppState<P, S, N>>,
    collection: web::Path<String>,
    request: web::Json<RegisterProfileRequest>,
) -> HttpResponse
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    let Some(role_type) = role_for_collection(&collection) else {
        return unknown_collection(&collection);
    };

    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let command = match request.into_command(role_type) {
        Ok(command) => command,
        Err(error) => return handle_domain_error(error),
    };

    match state.registration_service.register(command).await {
        Ok(receipt) => {
            let message = if receipt.code_issued {
                "Profile registered. A verification code was sent to the address"
            } else {
                "Profile registered. Request a verification code to confirm the address"
            };
            HttpResponse::Created().json(ApiResponse::success(receipt).with_message(message))
        }
        Err(error) => handle_domain_error(error),
    }
}
