use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::{bson, error::Error as MongoError};
use thiserror::Error;
use bson::ser::Error as BsonError;
use bson::de::Error as BsonDeError;

use crate::api::response::PetResponse;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Request deadline of {0:?} exceeded")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    MongoError(#[from] MongoError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] BsonError),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] BsonDeError)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_)
            | ApiError::Timeout(_)
            | ApiError::MongoError(_)
            | ApiError::SerializationError(_)
            | ApiError::DeserializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        PetResponse::error(self.status_code(), self.to_string()).into_http()
    }
}

// ----------------------------- TESTS --------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use serde_json::Value;

    async fn extract_json_from_response(response: HttpResponse) -> Value {
        let body = response.into_body();
        let bytes = actix_web::body::to_bytes(body).await.unwrap();
        serde_json::from_slice(&bytes).expect("Failed to parse JSON response")
    }

    fn create_mock_mongo_error() -> MongoError {
        MongoError::from(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Test mongo error"
        ))
    }

    fn create_mock_bson_error() -> BsonError {
        let mut map = HashMap::new();
        map.insert(42, "value");

        bson::to_bson(&map).unwrap_err()
    }

    fn create_mock_bson_de_error() -> BsonDeError {
        let invalid_bson = bson::Bson::RegularExpression(bson::Regex {
            pattern: "".to_string(),
            options: "".to_string(),
        });

        bson::from_bson::<String>(invalid_bson).unwrap_err()
    }

    #[test]
    fn test_api_error_display() {
        let bad_request = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(bad_request.to_string(), "Bad request: Invalid input");

        let not_found = ApiError::NotFound("Pet with specified ID not found!".to_string());
        assert_eq!(not_found.to_string(), "Pet with specified ID not found!");

        let internal_error = ApiError::InternalServerError("Something went wrong".to_string());
        assert_eq!(internal_error.to_string(), "Internal server error: Something went wrong");

        let timeout = ApiError::Timeout(Duration::from_secs(10));
        assert_eq!(timeout.to_string(), "Request deadline of 10s exceeded");

        let short_timeout = ApiError::Timeout(Duration::from_millis(50));
        assert_eq!(short_timeout.to_string(), "Request deadline of 50ms exceeded");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ApiError::InternalServerError("x".into()).status_code(), 500);
        assert_eq!(ApiError::Timeout(Duration::from_secs(1)).status_code(), 500);
        assert_eq!(ApiError::MongoError(create_mock_mongo_error()).status_code(), 500);
        assert_eq!(ApiError::SerializationError(create_mock_bson_error()).status_code(), 500);
        assert_eq!(ApiError::DeserializationError(create_mock_bson_de_error()).status_code(), 500);
    }

    #[actix_web::test]
    async fn test_bad_request_error_response() {
        let error = ApiError::BadRequest("Missing required field".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), 400);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["status"], 400);
        assert_eq!(json["message"], "error");
        assert_eq!(json["data"]["data"], "Bad request: Missing required field");
    }

    #[actix_web::test]
    async fn test_not_found_error_response() {
        let error = ApiError::NotFound("Pet with specified ID not found!".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), 404);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["data"]["data"], "Pet with specified ID not found!");
    }

    #[actix_web::test]
    async fn test_mongo_error_response() {
        let error = ApiError::MongoError(create_mock_mongo_error());
        let response = error.error_response();

        assert_eq!(response.status(), 500);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["status"], 500);
        assert!(json["data"]["data"].as_str().unwrap().starts_with("Database error:"));
    }

    #[test]
    fn test_from_conversions() {
        match ApiError::from(create_mock_mongo_error()) {
            ApiError::MongoError(_) => {}
            other => panic!("Expected MongoError variant, got {:?}", other),
        }
        match ApiError::from(create_mock_bson_error()) {
            ApiError::SerializationError(_) => {}
            other => panic!("Expected SerializationError variant, got {:?}", other),
        }
        match ApiError::from(create_mock_bson_de_error()) {
            ApiError::DeserializationError(_) => {}
            other => panic!("Expected DeserializationError variant, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_envelope_json_structure() {
        let error = ApiError::BadRequest("Test message".to_string());
        let response = error.error_response();
        let json = extract_json_from_response(response).await;

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("status"));
        assert!(obj.contains_key("message"));
        assert!(obj["data"].as_object().unwrap().contains_key("data"));
    }

    #[actix_web::test]
    async fn test_special_characters_in_messages() {
        let special_message = "Error with \"quotes\" and \n newlines and \t tabs";
        let error = ApiError::InternalServerError(special_message.to_string());
        let response = error.error_response();
        let json = extract_json_from_response(response).await;

        assert_eq!(json["data"]["data"], format!("Internal server error: {}", special_message));
    }

    #[actix_web::test]
    async fn test_content_type_header() {
        let error = ApiError::BadRequest("test".to_string());
        let response = error.error_response();

        let content_type = response.headers().get("content-type");
        assert!(content_type.is_some());

        let content_type_str = content_type.unwrap().to_str().unwrap();
        assert!(content_type_str.contains("application/json"));
    }
}
