//! Body extractor that accepts either JSON objects or urlencoded forms.

use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde_json::Value;

use crate::server::error::{AppError, ErrorResponse};
use crate::server::request_log::RequestId;

/// Submitted fields as strings, keyed by field name.
///
/// JSON numbers and booleans are stringified so both encodings go through the
/// same validation. `null` counts as absent. A body with any other content
/// type yields no fields.
#[derive(Debug, Clone, Default)]
pub struct Fields(pub HashMap<String, String>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

fn json_to_fields(value: Value) -> Result<HashMap<String, String>, AppError> {
    let Value::Object(map) = value else {
        return Err(AppError::InvalidRequest(
            "JSON body must be an object".to_string(),
        ));
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, text))
        })
        .collect())
}

async fn extract<S>(req: Request, state: &S) -> Result<HashMap<String, String>, AppError>
where
    S: Send + Sync,
{
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidRequest(e.body_text()))?;
        json_to_fields(value)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(map) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidRequest(e.body_text()))?;
        Ok(map)
    } else {
        Ok(HashMap::new())
    }
}

/// A body that could not be turned into [`Fields`].
///
/// Renders as the JSON error body by default. The form handler takes
/// `Result<Fields, FieldsRejection>` and shows the message on the page instead.
#[derive(Debug)]
pub struct FieldsRejection {
    pub error: AppError,
    pub request_id: String,
}

impl IntoResponse for FieldsRejection {
    fn into_response(self) -> Response {
        ErrorResponse::from_error(&self.error, &self.request_id)
    }
}

impl<S> FromRequest<S> for Fields
where
    S: Send + Sync,
{
    type Rejection = FieldsRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_default();

        extract(req, state).await.map(Fields).map_err(|error| {
            tracing::debug!(error = %error, "rejected request body");
            FieldsRejection { error, request_id }
        })
    }
}
