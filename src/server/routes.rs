use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::filter::{DashboardFilter, FilterOptions};
use crate::report::DashboardReport;
use crate::server::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Comma-separated selections. Absent selects everything, empty selects nothing.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub department: Option<String>,
    pub job_role: Option<String>,
    pub gender: Option<String>,
    pub performance: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn fail(status: StatusCode, error: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

fn split(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ReportParams {
    pub fn to_filter(&self) -> Result<DashboardFilter, String> {
        let performance = match &self.performance {
            Some(list) => Some(
                split(list)
                    .iter()
                    .map(|p| p.parse::<i64>().map_err(|_| format!("invalid performance rating: {}", p)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(DashboardFilter {
            departments: self.department.as_deref().map(split),
            job_roles: self.job_role.as_deref().map(split),
            genders: self.gender.as_deref().map(split),
            performance,
        })
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_options(State(state): State<Arc<AppState>>) -> ApiResult<FilterOptions> {
    FilterOptions::from_table(&state.dataset)
        .map(Json)
        .map_err(|e| fail(StatusCode::INTERNAL_SERVER_ERROR, e))
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> ApiResult<DashboardReport> {
    let filter = params.to_filter().map_err(|e| fail(StatusCode::BAD_REQUEST, e))?;

    let filtered = filter
        .apply(&state.dataset)
        .map_err(|e| fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    tracing::debug!("Report over {} of {} employees", filtered.len(), state.dataset.len());

    DashboardReport::build(&filtered)
        .map(Json)
        .map_err(|e| fail(StatusCode::INTERNAL_SERVER_ERROR, e))
}

pub async fn get_employees(State(state): State<Arc<AppState>>) -> ApiResult<serde_json::Value> {
    let store = state
        .store
        .clone()
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "no employee store configured"))?;

    let table = tokio::task::spawn_blocking(move || store.fetch_all())
        .await
        .map_err(|e| fail(StatusCode::INTERNAL_SERVER_ERROR, e))?
        .map_err(|e| fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(serde_json::json!({
        "count": table.len(),
        "columns": table.columns(),
        "employees": table.to_records(),
    })))
}
