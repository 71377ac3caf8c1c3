//! Erreurs HTTP

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use adnseq_core::ValidationError;
use adnseq_storage::StorageError;
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Séquence {0} introuvable")]
    NotFound(i64),

    #[error("Requête invalide: {0}")]
    BadRequest(String),

    #[error("Erreur de rendu: {0}")]
    Template(#[from] tera::Error),
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::Validation(_) | WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Storage(StorageError::InvalidToken) => StatusCode::NOT_FOUND,
            WebError::Storage(StorageError::TokenExpired) => StatusCode::GONE,
            WebError::Storage(StorageError::MissingField(_)) => StatusCode::BAD_REQUEST,
            WebError::Storage(_) | WebError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            WebError::Validation(ValidationError::InvalidCharacters(chars)) => {
                let offending: Vec<String> = chars.iter().map(char::to_string).collect();
                ErrorResponse::with_details(self.to_string(), offending.join(", "), status.as_u16())
            }
            _ => ErrorResponse::new(self.to_string(), status.as_u16()),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebError::Validation(ValidationError::Empty).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(WebError::NotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(WebError::Storage(StorageError::TokenExpired).status_code(), StatusCode::GONE);
        assert_eq!(
            WebError::Storage(StorageError::DatabaseError("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
