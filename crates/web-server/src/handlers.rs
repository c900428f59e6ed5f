use crate::{AppState, error::AppError};
use analytics::{CumulativePoint, HeadlineCards, SentimentPnl, SentimentWinRate};
use axum::{
    Json,
    extract::{Query, State},
    http::Uri,
};
use core_types::JoinedRecord;
use dataset::LoadReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}
fn default_page() -> usize { 1 }
fn default_limit() -> usize { 100 }

impl Default for Pagination {
    fn default() -> Self {
        Self { page: default_page(), limit: default_limit() }
    }
}

/// One page of the joined table.
#[derive(Debug, Serialize)]
pub struct TradePage {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub rows: Vec<JoinedRecord>,
}

#[derive(Debug, Serialize)]
pub struct LoadReports {
    pub trades: LoadReport,
    pub sentiment: LoadReport,
}

/// # GET /api/summary
/// The three headline cards: total PnL, trade count and win rate.
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<HeadlineCards> {
    Json(state.dashboard.headline())
}

/// # GET /api/trades?page=&limit=
pub async fn get_trades(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<TradePage>, AppError> {
    if pagination.page == 0 {
        return Err(AppError::BadRequest("page starts at 1".to_string()));
    }
    if pagination.limit == 0 || pagination.limit > MAX_PAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    let joined = &state.dashboard.joined;
    let rows = joined
        .iter()
        .skip((pagination.page - 1).saturating_mul(pagination.limit))
        .take(pagination.limit)
        .cloned()
        .collect();

    Ok(Json(TradePage {
        page: pagination.page,
        limit: pagination.limit,
        total: joined.len(),
        rows,
    }))
}

/// # GET /api/charts/pnl-by-sentiment
pub async fn get_pnl_by_sentiment(State(state): State<Arc<AppState>>) -> Json<Vec<SentimentPnl>> {
    Json(state.dashboard.report.pnl_by_sentiment.clone())
}

/// # GET /api/charts/win-rate-by-sentiment
pub async fn get_win_rate_by_sentiment(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SentimentWinRate>> {
    Json(state.dashboard.report.win_rate_by_sentiment.clone())
}

/// # GET /api/charts/cumulative-pnl
pub async fn get_cumulative_pnl(State(state): State<Arc<AppState>>) -> Json<Vec<CumulativePoint>> {
    Json(state.dashboard.report.cumulative_pnl.clone())
}

/// # GET /api/load-report
/// Row-level diagnostics for both input files.
pub async fn get_load_report(State(state): State<Arc<AppState>>) -> Json<LoadReports> {
    Json(LoadReports {
        trades: state.dashboard.trades_load.clone(),
        sentiment: state.dashboard.sentiment_load.clone(),
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {uri}"))
}
