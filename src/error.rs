use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskPulseError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not authorized: {0}")]
    Auth(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl TaskPulseError {
    pub fn to_error_code(&self) -> &'static str {
        match self {
            TaskPulseError::Validation(_) => "VALIDATION_ERROR",
            TaskPulseError::Auth(_) => "AUTH_ERROR",
            TaskPulseError::TaskNotFound(_) => "TASK_NOT_FOUND",
            TaskPulseError::Database(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// HTTP status this error maps to at the API boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            TaskPulseError::Validation(_) => 400,
            TaskPulseError::Auth(_) => 401,
            TaskPulseError::TaskNotFound(_) => 404,
            _ => 500,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskPulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_status() {
        assert_eq!(
            TaskPulseError::Validation("bad".into()).to_error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(TaskPulseError::Validation("bad".into()).http_status(), 400);
        assert_eq!(TaskPulseError::Auth("nope".into()).http_status(), 401);
        assert_eq!(TaskPulseError::TaskNotFound(7).http_status(), 404);
        assert_eq!(TaskPulseError::TaskNotFound(7).to_error_code(), "TASK_NOT_FOUND");
    }

    #[test]
    fn test_error_response_serialization() {
        let response = TaskPulseError::TaskNotFound(123).to_error_response();
        assert_eq!(response.code, "TASK_NOT_FOUND");
        assert!(response.error.contains("123"));
    }
}
