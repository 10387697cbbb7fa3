use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::error::{DomainError, RepositoryError};

/// json body of every error response
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps use-case failures onto HTTP statuses
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidCredentials
            | DomainError::AccountDeactivated
            | DomainError::InvalidToken => StatusCode::UNAUTHORIZED,
            DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
            DomainError::IncorrectPassword
            | DomainError::WeakPassword(_)
            | DomainError::PasswordTooLong(_)
            | DomainError::RoleUnchanged(_)
            | DomainError::EmptyUsername
            | DomainError::InvalidResidentId(_)
            | DomainError::InvalidDocumentReference(_)
            | DomainError::UnknownRole(_) => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound | DomainError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            DomainError::UsernameTaken
            | DomainError::AlreadySetUp
            | DomainError::Repository(RepositoryError::Duplicate(_)) => StatusCode::CONFLICT,
            DomainError::DocumentRequirementsNotMet(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::HashingUnavailable(_)
            | DomainError::TokenIssue(_)
            | DomainError::Repository(RepositoryError::DatabaseError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
