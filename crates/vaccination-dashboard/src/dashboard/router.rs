use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use super::context::DashboardContext;
use super::domain::FilterState;
use super::resolver::{
    compute_all_options, compute_map_view, compute_summary, dashboard_snapshot,
    handle_clear_filters, handle_map_click, year_options, MapClickEvent,
};
use super::views::{
    DashboardSnapshot, DatasetInfo, DependentOptions, MapView, SummaryView, YearOption,
};

/// Router builder exposing the resolver over JSON.
pub fn dashboard_router(context: Arc<DashboardContext>) -> Router {
    Router::new()
        .route("/api/v1/dataset", get(dataset_handler))
        .route("/api/v1/years", get(years_handler))
        .route("/api/v1/geography", get(geography_handler))
        .route("/api/v1/options", post(options_handler))
        .route("/api/v1/summary", post(summary_handler))
        .route("/api/v1/map", post(map_handler))
        .route("/api/v1/map/click", post(map_click_handler))
        .route("/api/v1/dashboard", post(snapshot_handler))
        .route("/api/v1/filters/clear", post(clear_handler))
        .with_state(context)
}

#[derive(Debug, Serialize)]
pub struct MapClickResponse {
    pub school: Option<String>,
}

pub(crate) async fn dataset_handler(
    State(context): State<Arc<DashboardContext>>,
) -> Json<DatasetInfo> {
    Json(context.info())
}

pub(crate) async fn years_handler(
    State(context): State<Arc<DashboardContext>>,
) -> Json<Vec<YearOption>> {
    Json(year_options(&context))
}

pub(crate) async fn geography_handler(State(context): State<Arc<DashboardContext>>) -> Response {
    match context.geography() {
        Some(geography) => (StatusCode::OK, Json(geography.document().clone())).into_response(),
        None => {
            let payload = json!({
                "error": "no geography boundary loaded",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn options_handler(
    State(context): State<Arc<DashboardContext>>,
    payload: Result<Json<FilterState>, JsonRejection>,
) -> Result<Json<DependentOptions>, AppError> {
    let Json(filters) = payload?;
    Ok(Json(compute_all_options(&context, &filters)))
}

pub(crate) async fn summary_handler(
    State(context): State<Arc<DashboardContext>>,
    payload: Result<Json<FilterState>, JsonRejection>,
) -> Result<Json<SummaryView>, AppError> {
    let Json(filters) = payload?;
    Ok(Json(compute_summary(&context, &filters)))
}

pub(crate) async fn map_handler(
    State(context): State<Arc<DashboardContext>>,
    payload: Result<Json<FilterState>, JsonRejection>,
) -> Result<Json<MapView>, AppError> {
    let Json(filters) = payload?;
    Ok(Json(compute_map_view(&context, &filters)))
}

pub(crate) async fn map_click_handler(
    payload: Result<Json<MapClickEvent>, JsonRejection>,
) -> Result<Json<MapClickResponse>, AppError> {
    let Json(event) = payload?;
    Ok(Json(MapClickResponse {
        school: handle_map_click(&event),
    }))
}

pub(crate) async fn snapshot_handler(
    State(context): State<Arc<DashboardContext>>,
    payload: Result<Json<FilterState>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let Json(filters) = payload?;
    Ok(Json(dashboard_snapshot(&context, &filters)))
}

pub(crate) async fn clear_handler(
    State(context): State<Arc<DashboardContext>>,
) -> Json<FilterState> {
    Json(handle_clear_filters(&context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::loader::{read_enrollments, read_vaccinations};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use std::io::Cursor;
    use tower::ServiceExt;

    fn context() -> Arc<DashboardContext> {
        let vaccinations = read_vaccinations(
            Cursor::new(
                "nome_unidade;tipo_unidade;modalidade;vacina;data_vacinacao_ano;idade;n_vacinas;latitude;longitude\n\
Escola A;EMEF;ENSINO FUNDAMENTAL;HPV;2023;11;10;-23.50;-46.78\n\
Escola B;EMEI;EDUCAÇÃO INFANTIL;TRIPLICE VIRAL;2023;4;20;-23.52;-46.80\n\
Escola C;EMEF;ENSINO FUNDAMENTAL;HPV;2023;12;5;-23.54;-46.82\n\
Escola C;EMEF;ENSINO FUNDAMENTAL;HPV;2022;12;1;-23.54;-46.82\n",
            ),
            2015,
        )
        .expect("vaccinations");
        let enrollments = read_enrollments(Cursor::new(
            "nome_unidade;tipo_unidade;ra\nEscola A;EMEF;1\nEscola B;EMEI;2\n",
        ))
        .expect("enrollments");
        Arc::new(DashboardContext::from_tables(vaccinations, enrollments))
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn map_route_returns_grouped_points() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/map",
            json!({"year": 2023, "school": null, "vaccine": "Todas"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let points = body["points"].as_array().expect("points array");
        assert_eq!(points.len(), 3);
        let total: i64 = points
            .iter()
            .map(|point| point["total_vaccines"].as_i64().unwrap())
            .sum();
        assert_eq!(total, 35);
        assert_eq!(body["zoom"], 11.0);
        assert!(body.get("layers").is_none());
    }

    #[tokio::test]
    async fn summary_route_formats_values() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/summary",
            json!({"school": "Escola A", "vaccine": "TRIPLICE VIRAL"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vaccine_total"], 0);
        assert_eq!(body["student_count"], 1);
        assert_eq!(body["formatted"]["vaccine_total"], "0");
        assert_eq!(body["formatted"]["mean_age"], "");
    }

    #[tokio::test]
    async fn options_route_returns_all_four_lists() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/options",
            json!({"unit_type": "EMEI"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let schools: Vec<&str> = body["school"]
            .as_array()
            .unwrap()
            .iter()
            .map(|option| option["value"].as_str().unwrap())
            .collect();
        assert_eq!(schools, vec!["Todas", "Escola B"]);
        assert_eq!(body["modality"][1]["label"], "Educação Infantil");
    }

    #[tokio::test]
    async fn click_and_clear_routes() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/map/click",
            json!({"points": [{"customdata": ["Escola C", 5]}]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["school"], "Escola C");

        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/map/click",
            json!({"points": []}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["school"].is_null());

        let (status, body) =
            post_json(dashboard_router(context()), "/api/v1/filters/clear", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2023);
        assert_eq!(body["school"], "Todas");
    }

    #[tokio::test]
    async fn malformed_filters_are_rejected_as_bad_request() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/dashboard",
            json!({"year": "last"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().expect("error message");
        assert!(message.starts_with("bad request:"));

        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/map/click",
            json!({"points": "Escola A"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_year_is_an_empty_result_not_an_error() {
        let (status, body) = post_json(
            dashboard_router(context()),
            "/api/v1/summary",
            json!({"year": 1990}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vaccine_total"], 0);
    }

    #[tokio::test]
    async fn geography_is_not_found_without_boundary() {
        let response = dashboard_router(context())
            .oneshot(
                Request::get("/api/v1/geography")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn years_handler_lists_observed_years() {
        let Json(years) = years_handler(State(context())).await;
        let values: Vec<i32> = years.into_iter().map(|option| option.value).collect();
        assert_eq!(values, vec![2022, 2023]);
    }
}
