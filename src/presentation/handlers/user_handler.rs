use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError, models::credential::PlainPassword,
        repositories::user_registration_repository::UserRegistrationRepository,
        services::password_service::PasswordHasher,
    },
    presentation::extractors::validated_json::ValidatedJson,
    usecase::register_user_usecase::{RegisterUserUsecase, RegistrationRequest},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use validator::Validate;

// Request

/// json for register request
#[derive(Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/* Router Function and Handler Function */

// Auth Router

/// function return Router object
/// Suppose to be nested under `/api/auth` by main router
pub fn create_auth_router<
    R: UserRegistrationRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterUserUsecase<R, P>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/register", post(register::<R, P>))
        .with_state(state)
}

pub struct AppState<R: UserRegistrationRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterUserUsecase<R, P>>,
}

impl<R: UserRegistrationRepository, P: PasswordHasher> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

// handler function

/// handler function for register
async fn register<
    R: UserRegistrationRepository + Send + Sync,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Response {
    let password = match PlainPassword::new(payload.password) {
        Ok(password) => password,
        Err(e) => return error_response(e),
    };
    let request = RegistrationRequest {
        username: payload.username,
        email: payload.email,
        password,
    };

    match state.register_service.register(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a failed registration to its boundary response.
/// Internal failures are logged here and answered with an opaque body.
fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::DuplicateUsername => {
            (StatusCode::BAD_REQUEST, "username already taken").into_response()
        }
        DomainError::DuplicateEmail => {
            (StatusCode::BAD_REQUEST, "email already taken").into_response()
        }
        DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        other => {
            error!(error = %other, "registration failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error").into_response()
        }
    }
}
