use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Serialize;

use crate::db::queries::{categories, summary, transactions};
use crate::error::{AppError, AppResult};
use crate::handlers::home::MonthParams;
use crate::models::{Category, Transaction};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub label: String,
    pub start: i64,
    pub end: i64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings: f64,
}

pub async fn monthly_summary(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<MonthlySummary>> {
    let month = state.resolve_month(params.month.as_deref())?;
    let window = month.window();
    let conn = state.db.get()?;

    let totals = summary::monthly_totals(&conn, &window)?;

    Ok(Json(MonthlySummary {
        month: month.query_value(),
        label: month.label(),
        start: window.start,
        end: window.end,
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        savings: totals.savings(),
    }))
}

pub async fn list_transactions(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let conn = state.db.get()?;
    Ok(Json(transactions::list_transactions(&conn)?))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Transaction>> {
    let conn = state.db.get()?;
    transactions::get_transaction(&conn, id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", id)))
}

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let conn = state.db.get()?;
    Ok(Json(categories::list_categories(&conn)?))
}
