use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;
use std::convert::From;

pub const ALREADY_EXISTS: &str = "an object with this value already exists";
pub const MISSING_REFERENCE: &str = "referenced object does not exist";
pub const OUT_OF_RANGE: &str = "value is out of range";

#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),

    #[display(fmt = "Unauthorized")]
    Unauthorized,

    #[display(fmt = "Forbidden: {}", _0)]
    Forbidden(String),

    #[display(fmt = "Not Found: {}", _0)]
    NotFound(String),
}

impl ServiceError {
    /// NotFound for a lookup by id, named after the missing entity
    pub fn not_found(entity: &str) -> ServiceError {
        ServiceError::NotFound(format!("{} matching query does not exist.", entity))
    }
}

// impl ResponseError trait allows to convert our errors into http responses with appropriate data
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServiceError::InternalServerError => "Internal Server Error, Please try later",
            ServiceError::Unauthorized => "Unauthorized",
            ServiceError::BadRequest(ref message)
            | ServiceError::Conflict(ref message)
            | ServiceError::Forbidden(ref message)
            | ServiceError::NotFound(ref message) => message,
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> ServiceError {
        if let Some(db_error) = error.as_database_error() {
            // constraint names and table layout stay in the logs
            if db_error.is_unique_violation() {
                debug!("unique violation: {}", db_error.message());
                return ServiceError::Conflict(ALREADY_EXISTS.to_string());
            }
            if db_error.is_foreign_key_violation() {
                debug!("foreign key violation: {}", db_error.message());
                return ServiceError::BadRequest(MISSING_REFERENCE.to_string());
            }
            if db_error.is_check_violation() {
                debug!("check violation: {}", db_error.message());
                return ServiceError::BadRequest(OUT_OF_RANGE.to_string());
            }
        }

        match error {
            sqlx::Error::RowNotFound => ServiceError::NotFound("Not Found".to_string()),
            _ => {
                error!("db error: {}", error);
                ServiceError::InternalServerError
            }
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> ServiceError {
        ServiceError::BadRequest(errors.to_string())
    }
}

impl From<argon2::Error> for ServiceError {
    fn from(error: argon2::Error) -> ServiceError {
        error!("password hashing error: {}", error);
        ServiceError::InternalServerError
    }
}

impl From<actix_web::error::BlockingError> for ServiceError {
    fn from(error: actix_web::error::BlockingError) -> ServiceError {
        error!("actix threadpool error: {}", error);
        ServiceError::InternalServerError
    }
}

/// A referenced row that doesn't exist is invalid input, not a missing resource
pub fn invalid_reference(field: &'static str, id: i64) -> impl FnOnce(ServiceError) -> ServiceError {
    move |error| match error {
        ServiceError::NotFound(_) => ServiceError::BadRequest(format!(
            "{}: Invalid pk \"{}\" - object does not exist.",
            field, id
        )),
        error => error,
    }
}
