//! Translation of domain and request errors into HTTP responses
//!
//! Every failure leaves the API in the same envelope:
//! `{status: "error", error, message, details?, timestamp}`.

use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ss_core::errors::{DomainError, ValidationError, VerificationError};
use ss_shared::{error_codes, ErrorResponse};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(validation) => {
            tracing::debug!(error = %validation, "Request rejected by validation");
            HttpResponse::BadRequest().json(validation_response(&validation))
        }
        DomainError::Verification(verification) => {
            HttpResponse::BadRequest().json(verification_response(verification))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Conflict { message } => {
            HttpResponse::Conflict().json(ErrorResponse::new(error_codes::CONFLICT, message))
        }
        DomainError::StoreUnavailable { message } | DomainError::Internal { message } => {
            // Details stay in the logs
            tracing::error!(error = %message, "Request failed with an internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred. Please try again later",
            ))
        }
    }
}

fn validation_response(error: &ValidationError) -> ErrorResponse {
    let message = match error {
        ValidationError::RequiredField { field } => format!("{} is required", field),
        ValidationError::InvalidFormat { field } => format!("{} has an invalid format", field),
        ValidationError::UnknownValue { field, value } => {
            format!("'{}' is not a valid {}", value, field)
        }
        ValidationError::TooShort { field, min } => {
            format!("{} must be at least {} characters", field, min)
        }
        ValidationError::DomainNotAllowed { domain } => {
            format!("Email addresses at {} are not accepted", domain)
        }
    };

    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, message);
    match error.field() {
        Some(field) => response.add_detail("field", field),
        None => response,
    }
}

// The invalid-code message is the same whether or not the address has codes
fn verification_response(error: VerificationError) -> ErrorResponse {
    match error {
        VerificationError::InvalidCode => ErrorResponse::new(
            error_codes::INVALID_CODE,
            "Invalid verification code",
        ),
        VerificationError::AlreadyUsed => ErrorResponse::new(
            error_codes::CODE_ALREADY_USED,
            "This verification code has already been used",
        ),
        VerificationError::Expired => ErrorResponse::new(
            error_codes::CODE_EXPIRED,
            "This verification code has expired. Please request a new one",
        ),
    }
}

/// Build a 400 response from `validator` field errors
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request data. Please check the highlighted fields",
    );
    if let Some((first, _)) = fields.first() {
        response = response.add_detail("field", first);
    }
    response = response.add_detail(
        "fields",
        fields.into_iter().collect::<std::collections::BTreeMap<_, _>>(),
    );

    HttpResponse::BadRequest().json(response)
}

/// Error handler for malformed JSON bodies, installed through `JsonConfig`
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %error, "Malformed JSON body");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        format!("Malformed request body: {}", error),
    ));
    InternalError::from_response(error, response).into()
}

/// Error handler for path segments that fail to parse, installed through `PathConfig`
///
/// A profile id that is not a number names no resource, so this answers 404.
pub fn path_error_handler(error: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %error, path = %req.path(), "Unparseable path segment");

    let response = HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ));
    InternalError::from_response(error, response).into()
}
