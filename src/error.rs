use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta},
    validation::FieldErrors,
};

const DUPLICATE_RECORD: &str = "Record already exists";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Database error")]
    Orm(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{entity} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::Orm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a unique-constraint violation to `Conflict`, using the message registered for
    /// the violated constraint. Anything else stays a store error.
    pub fn unique_or_db(err: DbErr, conflicts: &[(&str, &str)]) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                Self::conflict_for(&detail, conflicts)
            }
            _ => AppError::Orm(err),
        }
    }

    /// `detail` is the store's violation message, which names the constraint.
    pub fn conflict_for(detail: &str, conflicts: &[(&str, &str)]) -> Self {
        let message = conflicts
            .iter()
            .find(|(constraint, _)| detail.contains(*constraint))
            .map_or(DUPLICATE_RECORD, |(_, message)| *message);
        AppError::Conflict(message.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let (fields, details) = match self {
            AppError::Validation(fields) => (Some(fields), None),
            AppError::Orm(err) => {
                tracing::error!(error = %err, "database error");
                (None, Some(err.to_string()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (None, Some(err.to_string()))
            }
            _ => (None, None),
        };

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                fields,
                details,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
