use actix_web::{web, HttpResponse};
use validator::Validate;

use ss_core::{IssueCodeCommand, NotifierTrait, ProfileRepository, VerificationStore};
use ss_shared::email::mask_address;
use ss_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /email/request-code
///
/// # Request Body
///
/// ```json
/// {
///     "address": "ana@itcelaya.edu.mx",
///     "roleType": "student",
///     "profileId": 7,
///     "purpose": "signup"
/// }
/// ```
///
/// Only `address` is required.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "data": { "address": "ana@itcelaya.edu.mx" },
///     "message": "Verification code sent"
/// }
/// ```
///
/// The response does not wait for delivery; a failed send is only logged.
///
/// ## Errors
/// - 400 `validation_error`: missing address, unknown roleType or purpose, rejected domain
/// - 500 `internal_error`: the store is unavailable
pub async fn request_code<P, S, N>(
    state: web::Data<AppState<P, S, N>>,
    request: web::Json<RequestCodeRequest>,
) -> HttpResponse
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::debug!(error = %errors, "Invalid request-code body");
        return handle_validation_errors(&errors);
    }

    tracing::debug!(address = %mask_address(&request.address), "Processing request-code");

    let command = IssueCodeCommand {
        address: request.address,
        role_type: request.role_type,
        profile_id: request.profile_id,
        purpose: request.purpose,
    };

    match state.verification_service.issue_code(command).await {
        Ok(receipt) => HttpResponse::Ok().json(
            ApiResponse::success(RequestCodeResponse {
                address: receipt.address,
            })
            .with_message("Verification code sent"),
        ),
        Err(error) => handle_domain_error(error),
    }
}
