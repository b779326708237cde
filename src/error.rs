use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields or images")]
    MissingFields,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("MRP should be greater than 1000")]
    MrpTooLow,

    #[error("discount cannot be greater than 5")]
    DiscountTooHigh,

    #[error("shipping charge cannot be greater than 500")]
    ShippingChargeTooHigh,

    #[error("Enter valid MRP, discount or shipping charge")]
    InvalidTotalPrice,

    #[error("{0}, already exist")]
    DuplicateName(String),

    #[error("no such product exist")]
    NoSuchProduct(String),

    #[error("Invalid product id: {0}")]
    InvalidId(#[from] mongodb::bson::oid::Error),

    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Upload error: {0}")]
    Upload(#[from] std::io::Error),
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(_: axum::extract::multipart::MultipartError) -> Self {
        AppError::MalformedPayload
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFields | AppError::MalformedPayload => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),

            AppError::MrpTooLow
            | AppError::DiscountTooHigh
            | AppError::ShippingChargeTooHigh
            | AppError::InvalidTotalPrice
            | AppError::DuplicateName(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": self.to_string() })),
            )
                .into_response(),

            AppError::NoSuchProduct(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": cause, "message": "no such product exist" })),
            )
                .into_response(),

            AppError::InvalidId(_) | AppError::Store(_) | AppError::Upload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_is_bad_request() {
        let response = AppError::MissingFields.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn business_rule_failures_are_server_errors() {
        for error in [
            AppError::MrpTooLow,
            AppError::DiscountTooHigh,
            AppError::ShippingChargeTooHigh,
            AppError::InvalidTotalPrice,
            AppError::DuplicateName("Widget".to_string()),
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn duplicate_names_the_existing_record() {
        let message = AppError::DuplicateName("Widget".to_string()).to_string();
        assert_eq!(message, "Widget, already exist");
    }
}
