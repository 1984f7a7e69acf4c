use actix_web::{web, HttpResponse};
use validator::Validate;

use ss_core::{NotifierTrait, ProfileRepository, VerificationStore};
use ss_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /email/verify-code
///
/// # Request Body
///
/// ```json
/// { "address": "ana@itcelaya.edu.mx", "code": "042917" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "data": { "address": "ana@itcelaya.edu.mx", "profileId": 7, "roleType": "student" },
///     "message": "Email verified"
/// }
/// ```
///
/// ## Errors
/// - 400 `validation_error`: missing address or code
/// - 400 `invalid_code`, `code_already_used`, `code_expired`
/// - 500 `internal_error`
pub async fn verify_code<P, S, N>(
    state: web::Data<AppState<P, S, N>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    P: ProfileRepository + 'static,
    S: VerificationStore + 'static,
    N: NotifierTrait + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .verification_service
        .verify_code(&request.address, &request.code)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(
            ApiResponse::success(VerifyCodeResponse::from(outcome)).with_message("Email verified"),
        ),
        Err(error) => handle_domain_error(error),
    }
}
