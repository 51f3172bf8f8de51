use actix_web::http::StatusCode;
use thiserror::Error;

/// Failures a caller can act on. Everything else surfaces as `internal`.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl ScheduleError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        ScheduleError::Validation(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ScheduleError::NotFound(msg.into())
    }

    /// Short error code string sent to clients in every error response.
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::Validation(_) => "validation",
            ScheduleError::NotFound(_) => "not_found",
            ScheduleError::Configuration(_) => "configuration",
            ScheduleError::Unauthorized(_) => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ScheduleError::Validation(_) | ScheduleError::Configuration(_) => {
                StatusCode::BAD_REQUEST
            }
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

pub fn error_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<ScheduleError>()
        .map_or("internal", ScheduleError::kind)
}

pub fn error_status(err: &anyhow::Error) -> StatusCode {
    err.downcast_ref::<ScheduleError>()
        .map_or(StatusCode::INTERNAL_SERVER_ERROR, ScheduleError::status)
}
