use crate::api::error::ApiError;

use tm_auth::AuthError;
use tm_core::ErrorLocation;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;

fn location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[test]
fn test_status_codes_per_variant() {
    let cases = [
        (
            ApiError::Validation {
                message: "bad".into(),
                field: None,
                location: location(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Duplicate {
                message: "dup".into(),
                location: location(),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Unauthorized {
                message: "no".into(),
                location: location(),
            },
            StatusCode::UNAUTHORIZED,
        ),
        (
            ApiError::NotFound {
                message: "gone".into(),
                location: location(),
            },
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::RateLimited {
                message: "slow down".into(),
                location: location(),
            },
            StatusCode::TOO_MANY_REQUESTS,
        ),
        (
            ApiError::Internal {
                message: "boom".into(),
                location: location(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

#[test]
fn test_invalid_credentials_maps_to_generic_401() {
    let api_error = ApiError::from(AuthError::InvalidCredentials {
        location: location(),
    });

    match &api_error {
        ApiError::Unauthorized { message, .. } => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    assert_eq!(api_error.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_token_failures_collapse_to_one_message() {
    // Expired and undecodable tokens produce the same client-facing text
    let expired = ApiError::from(AuthError::TokenExpired {
        location: location(),
    });
    let missing = ApiError::from(AuthError::MissingHeader {
        location: location(),
    });

    for error in [expired, missing] {
        match error {
            ApiError::Unauthorized { message, .. } => {
                assert_eq!(message, "Invalid or missing access token");
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}

#[test]
fn test_store_errors_never_leak_detail() {
    let db_error = tm_db::DbError::Initialization {
        message: "users.created_at corrupt at row 17".into(),
        location: location(),
    };

    let api_error = ApiError::from(AuthError::from(db_error));

    match api_error {
        ApiError::Internal { message, .. } => {
            assert_eq!(message, "Internal server error");
        }
        other => panic!("expected Internal, got {:?}", other),
    }
}

#[test]
fn test_validation_error_carries_field_name() {
    let api_error = ApiError::from(AuthError::Validation {
        field: "email",
        message: "email is required".into(),
        location: location(),
    });

    match api_error {
        ApiError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("email"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}
