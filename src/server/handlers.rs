//! Route handlers for the form page and the JSON API.

use axum::body::Body;
use axum::extract::{Extension, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::calc::{InterestRequest, InterestResult, ValidationError};
use crate::loan::{schedule_to_csv, ExportFormat, LoanRequest};
use crate::server::error::{AppError, ErrorResponse};
use crate::server::fields::{Fields, FieldsRejection};
use crate::server::page::{self, FormValues, Outcome};
use crate::server::request_log::RequestId;
use crate::server::AppState;

pub const CSV_FILENAME: &str = "simple_loan_schedule.csv";

fn interest_from(fields: &Fields) -> Result<InterestRequest, ValidationError> {
    InterestRequest::from_fields(fields.get("principal"), fields.get("rate"), fields.get("time"))
}

pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let config = state.config.get();
    Html(page::render(
        &config.calculator,
        &FormValues::default(),
        &Outcome::Empty,
    ))
}

/// Form submission. Invalid input re-renders the form with the message.
///
/// A body that cannot be decoded at all is reported on the page too, with
/// empty inputs.
pub async fn submit_form(
    State(state): State<AppState>,
    fields: Result<Fields, FieldsRejection>,
) -> (StatusCode, Html<String>) {
    let config = state.config.get();
    let fields = match fields {
        Ok(fields) => fields,
        Err(rejection) => {
            let outcome = Outcome::Error(rejection.error.to_string());
            return (
                rejection.error.status_code(),
                Html(page::render(&config.calculator, &FormValues::default(), &outcome)),
            );
        }
    };

    let values = FormValues {
        principal: fields.get("principal").unwrap_or_default().to_string(),
        rate: fields.get("rate").unwrap_or_default().to_string(),
        time: fields.get("time").unwrap_or_default().to_string(),
    };

    let (status, outcome) = match interest_from(&fields) {
        Ok(request) => {
            let result = request.evaluate();
            tracing::debug!(
                principal = request.principal,
                rate = request.rate,
                time = request.time,
                interest = result.simple_interest,
                "calculated simple interest"
            );
            (StatusCode::OK, Outcome::Result(result))
        }
        Err(err) => {
            tracing::debug!(error = %err, "form validation failed");
            (StatusCode::BAD_REQUEST, Outcome::Error(err.to_string()))
        }
    };

    (status, Html(page::render(&config.calculator, &values, &outcome)))
}

pub async fn api_calc(
    Extension(request_id): Extension<RequestId>,
    fields: Fields,
) -> Result<Json<InterestResult>, Response> {
    let request = interest_from(&fields).map_err(|err| {
        tracing::debug!(error = %err, "calculation rejected");
        ErrorResponse::from_error(&AppError::from(err), request_id.as_str())
    })?;
    Ok(Json(request.evaluate()))
}

pub async fn api_simple_loan(
    Extension(request_id): Extension<RequestId>,
    fields: Fields,
) -> Response {
    let today = chrono::Local::now().date_naive();
    match simple_loan(&fields, today) {
        Ok(response) => response,
        Err(err) => {
            if err.status_code().is_client_error() {
                tracing::debug!(error = %err, "loan request rejected");
            } else {
                tracing::error!(error = %err, "loan schedule failed");
            }
            ErrorResponse::from_error(&err, request_id.as_str())
        }
    }
}

fn simple_loan(fields: &Fields, today: chrono::NaiveDate) -> Result<Response, AppError> {
    let request = LoanRequest::from_fields(&fields.0, today)?;
    let loan = request.amortize()?;
    tracing::debug!(
        payments = loan.schedule.len(),
        payment = loan.payment,
        total_interest = loan.total_interest,
        "amortized loan"
    );

    match request.export {
        ExportFormat::Csv => {
            let csv = schedule_to_csv(&loan.schedule)?;
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "text/csv")
                .header(
                    CONTENT_DISPOSITION,
                    format!("attachment; filename={}", CSV_FILENAME),
                )
                .body(Body::from(csv))?)
        }
        ExportFormat::Json => Ok(Json(loan.into_summary(request.include_schedule)).into_response()),
    }
}
