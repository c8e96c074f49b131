use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor whose rejections use the `ApiResponse` envelope
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(BodyRejection::Json)
    }
}

/// Urlencoded form extractor used by the admin panel
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Form::<T>::from_request(req, state)
            .await
            .map(|Form(value)| Self(value))
            .map_err(BodyRejection::Form)
    }
}

pub enum BodyRejection {
    Json(JsonRejection),
    Form(FormRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let message = match self {
            BodyRejection::Json(JsonRejection::JsonDataError(err)) => {
                format!("Invalid JSON data: {}", err)
            }
            BodyRejection::Json(JsonRejection::JsonSyntaxError(err)) => {
                format!("Invalid JSON syntax: {}", err)
            }
            BodyRejection::Json(JsonRejection::MissingJsonContentType(err)) => {
                format!("Missing JSON content type: {}", err)
            }
            BodyRejection::Json(_) => "Failed to parse JSON body".to_string(),
            BodyRejection::Form(FormRejection::InvalidFormContentType(err)) => {
                format!("Expected a form submission: {}", err)
            }
            BodyRejection::Form(FormRejection::FailedToDeserializeForm(err)) => {
                format!("Invalid form data: {}", err)
            }
            BodyRejection::Form(FormRejection::FailedToDeserializeFormBody(err)) => {
                format!("Invalid form data: {}", err)
            }
            BodyRejection::Form(_) => "Failed to parse form body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}
