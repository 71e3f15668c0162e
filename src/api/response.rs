use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Whether a response carries a result or an error description.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Serialize, Debug)]
pub struct Payload<T> {
    pub data: T,
}

/// Envelope every pet endpoint answers with:
/// `{"status": 200, "message": "success", "data": {"data": ...}}`.
#[derive(Serialize, Debug)]
pub struct PetResponse<T> {
    pub status: u16,
    pub message: Outcome,
    pub data: Payload<T>,
}

impl<T: Serialize> PetResponse<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        PetResponse {
            status: status.as_u16(),
            message: Outcome::Success,
            data: Payload { data },
        }
    }

    /// Renders the envelope, using `status` as the HTTP status code too.
    pub fn into_http(self) -> HttpResponse {
        let code = StatusCode::from_u16(self.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(code).json(self)
    }
}

impl PetResponse<String> {
    pub fn error(status: StatusCode, description: String) -> Self {
        PetResponse {
            status: status.as_u16(),
            message: Outcome::Error,
            data: Payload { data: description },
        }
    }
}
