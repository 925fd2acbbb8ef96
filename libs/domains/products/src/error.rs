use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Produto não encontrado com id: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Produto não encontrado com id: {}", id))
            }
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message_names_id() {
        let app_error: AppError = ProductError::NotFound(999999).into();
        let body = app_error.to_body();

        assert_eq!(body.status, 404);
        assert_eq!(body.message, "Produto não encontrado com id: 999999");
    }

    #[test]
    fn test_database_error_is_internal() {
        let app_error: AppError = ProductError::from(sea_orm::DbErr::Custom("pool timed out".into())).into();

        assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!app_error.to_body().message.contains("pool timed out"));
    }
}
