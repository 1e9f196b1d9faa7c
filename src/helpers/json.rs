use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde::Serialize;

/// Envelope shared by every JSON response of the API.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub status: String,
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T> {
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T: Serialize> JsonResponseBuilder<T> {
    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn into_response(self, code: StatusCode, message: &str) -> HttpResponse {
        let status = if code.is_success() { "OK" } else { "Error" };
        let message = if message.trim().is_empty() {
            code.canonical_reason().unwrap_or_default().to_string()
        } else {
            message.to_string()
        };

        HttpResponse::build(code).json(JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16(),
            id: self.id,
            item: self.item,
            list: self.list,
        })
    }

    fn into_error(self, code: StatusCode, message: &str) -> Error {
        let response = self.into_response(code, message);
        InternalError::from_response(message.to_string(), response).into()
    }

    pub fn ok(self, message: &str) -> HttpResponse {
        self.into_response(StatusCode::OK, message)
    }

    pub fn created(self, message: &str) -> HttpResponse {
        self.into_response(StatusCode::CREATED, message)
    }

    pub fn response(self, code: StatusCode, message: &str) -> HttpResponse {
        self.into_response(code, message)
    }

    pub fn form_error(self, message: String) -> Error {
        self.into_error(StatusCode::BAD_REQUEST, &message)
    }

    pub fn not_found(self, message: &str) -> Error {
        self.into_error(StatusCode::NOT_FOUND, message)
    }
}
