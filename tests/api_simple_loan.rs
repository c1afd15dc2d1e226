mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, post_form, post_json, send, test_router};
use serde_json::json;

#[tokio::test]
async fn test_json_schedule() {
    let response = send(
        test_router(),
        post_json(
            "/api/simple_loan",
            json!({
                "principal": 1200,
                "annual_rate": 0,
                "term_years": 1,
                "start_date": "2024-01-31"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["payment"], 100.0);
    assert_eq!(body["total_interest"], 0.0);
    assert_eq!(body["total_payment"], 1200.0);

    let schedule = body["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule[0]["payment_no"], 1);
    assert_eq!(schedule[0]["date"], "2024-01-31");
    assert_eq!(schedule[1]["date"], "2024-02-29");
    assert_eq!(schedule[11]["balance"], 0.0);
}

#[tokio::test]
async fn test_rate_and_time_aliases_with_form_body() {
    let response = send(
        test_router(),
        post_form(
            "/api/simple_loan",
            "principal=1000&rate=12&time=1&include_schedule=no&start_date=2024-01-01",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["payment"], 88.85);
    assert!(body.get("schedule").is_none());
}

#[tokio::test]
async fn test_csv_export() {
    let response = send(
        test_router(),
        post_json(
            "/api/simple_loan",
            json!({
                "principal": "300",
                "annual_rate": "0",
                "term_years": "0.25",
                "start_date": "2024-03-15",
                "export": "csv",
                "include_schedule": false
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/csv");
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=simple_loan_schedule.csv"
    );

    let csv = body_string(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "payment_no,date,payment,interest,principal,balance",
            "1,2024-03-15,100.00,0.00,100.00,200.00",
            "2,2024-04-15,100.00,0.00,100.00,100.00",
            "3,2024-05-15,100.00,0.00,100.00,0.00",
        ]
    );
}

#[tokio::test]
async fn test_zero_term_is_rejected() {
    let response = send(
        test_router(),
        post_json(
            "/api/simple_loan",
            json!({"principal": 1000, "annual_rate": 5, "term_years": 0}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Term must be positive");
    assert!(body["error"].get("field").is_none());
}

#[tokio::test]
async fn test_bad_start_date_is_rejected() {
    let response = send(
        test_router(),
        post_json(
            "/api/simple_loan",
            json!({
                "principal": 1000,
                "annual_rate": 5,
                "term_years": 1,
                "start_date": "next tuesday"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Invalid start_date format, use YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_default_start_date_is_today() {
    let today = || chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let before = today();
    let body = body_json(
        send(
            test_router(),
            post_json(
                "/api/simple_loan",
                json!({"principal": 100, "annual_rate": 0, "term_years": 1, "payments_per_year": 1}),
            ),
        )
        .await,
    )
    .await;

    let after = today();

    let first = &body["schedule"][0];
    let date = first["date"].as_str().unwrap();
    assert!(date == before || date == after, "unexpected start date {}", date);
    assert_eq!(first["payment"], 100.0);
}
