use axum::http::StatusCode;
use rolegate_core::AppError;
use rolegate_models::Role;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleServiceError {
    #[error("Invalid role '{0}'. Must be one of: admin, moderator, user")]
    InvalidRole(String),
    #[error("User already has role '{0}'")]
    NoOpTransition(Role),
    #[error("User {0} not found")]
    NotFound(i64),
    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl RoleServiceError {
    /// `NotFound` maps to 500 alongside `Internal`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoleServiceError::InvalidRole(_) | RoleServiceError::NoOpTransition(_) => {
                StatusCode::BAD_REQUEST
            }
            RoleServiceError::NotFound(_) | RoleServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::new(self.status_code(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RoleServiceError::InvalidRole("root".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RoleServiceError::NoOpTransition(Role::User).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RoleServiceError::NotFound(9).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RoleServiceError::Internal(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_app_error_keeps_message() {
        let err = RoleServiceError::NoOpTransition(Role::Moderator).into_app_error();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "User already has role 'moderator'");
    }
}
