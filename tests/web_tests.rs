use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sec_insights::extractors::ExtractedFigures;
use sec_insights::web::{self, AppState};
use sec_insights::{Company, FinancialData};
use tower::ServiceExt;

fn figures(net_income: i64, operating_income: i64, summary: Option<&str>) -> ExtractedFigures {
    ExtractedFigures {
        net_income,
        operating_income,
        summary: summary.map(str::to_string),
    }
}

fn app() -> Router {
    let data = FinancialData::from_records([
        (Company::Apple, 2023, figures(96_995, 114_301, Some("Services <b>grew</b>."))),
        (Company::Apple, 2021, figures(94_680, 108_949, None)),
        (Company::Microsoft, 1996, figures(2_195, 3_078, None)),
    ]);
    web::router(Arc::new(AppState::new(data).unwrap()))
}

async fn get(path: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_lists_years_per_company() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/stock/apple/2021"));
    assert!(body.contains("/stock/apple/2023"));
    assert!(body.contains("/stock/microsoft/1996"));
    assert!(body.contains("/dash/microsoft"));
}

#[tokio::test]
async fn test_year_page_compares_with_previous_year() {
    let (status, body) = get("/stock/apple/2023").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("96,995"));
    assert!(body.contains("114,301"));
    assert!(body.contains("94,680"), "previous year's net income should be shown");
    assert!(body.contains("closest earlier year"));
    assert!(body.contains("Services &lt;b&gt;grew&lt;&#x2F;b&gt;."), "summary must be escaped: {body}");
}

#[tokio::test]
async fn test_earliest_year_has_no_comparison() {
    let (status, body) = get("/stock/apple/2021").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No earlier year on file"));
    assert!(!body.contains("Summary"));
}

#[tokio::test]
async fn test_unknown_year_and_company_are_not_found() {
    for path in [
        "/stock/apple/2022",
        "/stock/apple/latest",
        "/stock/apple/+2023",
        "/stock/microsoft/2023",
        "/stock/google/2023",
        "/stock/Apple/2023",
    ] {
        let (status, body) = get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert!(body.contains("404 Page Error"), "{path}");
    }
}

#[tokio::test]
async fn test_not_found_message_is_escaped() {
    let (status, body) = get("/stock/%3Cscript%3E/2023").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn test_chart_page_embeds_series() {
    let (status, body) = get("/dash/apple").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Apple Net Income by Year"));
    assert!(body.contains("Apple Operating Income by Year"));
    assert!(body.contains("[2021,2023]"));
    assert!(body.contains("[94680,96995]"));
    assert!(body.contains("[108949,114301]"));
    assert!(body.contains("\"blue\""));
    assert!(body.contains("\"green\""));

    let (status, body) = get("/dash/microsoft").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("[1996]"));
    assert!(body.contains("\"purple\""));
}

#[tokio::test]
async fn test_unrecognized_paths_are_not_found() {
    for path in ["/dash/tesla", "/dash", "/nope", "/stock/apple"] {
        let (status, _) = get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }
}
