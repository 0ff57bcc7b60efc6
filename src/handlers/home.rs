use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use chrono::{Local, NaiveDate, TimeZone};
use serde::Deserialize;
use tracing::{debug, info};

use crate::date_utils::MonthCursor;
use crate::db::queries::categories;
use crate::error::{AppError, AppResult, RenderHtml};
use crate::filters::format_money_html;
use crate::models::{NewTransaction, TransactionType};
use crate::services::ledger::{self, HomeSnapshot};
use crate::state::AppState;
use crate::VERSION;

#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}

pub struct SummaryView {
    pub label: String,
    pub month: String,
    pub prev_month: String,
    pub next_month: String,
    pub income_html: String,
    pub expenses_html: String,
    pub savings_html: String,
}

pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub kind: &'static str,
    pub amount_html: String,
}

pub struct CategoryOption {
    pub id: i64,
    pub label: String,
    pub kind: &'static str,
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub version: &'static str,
    pub summary: SummaryView,
    pub transactions: Vec<TransactionRow>,
    pub categories: Vec<CategoryOption>,
    pub kinds: Vec<&'static str>,
    pub today: String,
}

impl HomeTemplate {
    fn from_snapshot(snapshot: HomeSnapshot) -> Self {
        let names = snapshot.category_names();
        let transactions = snapshot
            .transactions
            .iter()
            .map(|t| TransactionRow {
                id: t.id,
                date: t.date_label(),
                description: t.description.clone(),
                category: names
                    .get(&t.category_id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "Uncategorized".into()),
                kind: t.transaction_type.as_str(),
                amount_html: format_money_html(signed_amount(t.amount, t.is_expense())),
            })
            .collect();

        let categories = snapshot
            .categories
            .iter()
            .map(|c| CategoryOption {
                id: c.id,
                label: c.display_name(),
                kind: c.category_type.as_str(),
            })
            .collect();

        let totals = snapshot.totals;
        let summary = SummaryView {
            label: snapshot.month.label(),
            month: snapshot.month.query_value(),
            prev_month: snapshot.month.prev().query_value(),
            next_month: snapshot.month.next().query_value(),
            income_html: format_money_html(totals.total_income),
            expenses_html: format_money_html(totals.total_expenses),
            savings_html: format_money_html(totals.savings()),
        };

        Self {
            title: "BudgetBuddy".into(),
            version: VERSION,
            summary,
            transactions,
            categories,
            kinds: TransactionType::all().iter().map(|k| k.as_str()).collect(),
            today: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Expenses are listed with a leading minus so the list reads like a ledger.
fn signed_amount(amount: f64, is_expense: bool) -> f64 {
    if is_expense && amount > 0.0 {
        -amount
    } else {
        amount
    }
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<Html<String>> {
    let month = state.resolve_month(params.month.as_deref())?;
    debug!(month = %month, "Loading home page");

    let mut conn = state.db.get()?;
    let snapshot = ledger::fetch_snapshot(&mut conn, month)?;

    HomeTemplate::from_snapshot(snapshot).render_html()
}

#[derive(Debug, Deserialize)]
pub struct TransactionFormData {
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub month: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_i64"
    )]
    pub category_id: Option<i64>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub transaction_type: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub date: Option<String>,
}

impl TransactionFormData {
    /// Validate the form against the seeded categories.
    ///
    /// The amount is a non-negative magnitude; the type decides which total it
    /// counts towards. Without an explicit type the category's type is used.
    pub fn to_new_transaction(&self, conn: &rusqlite::Connection) -> AppResult<NewTransaction> {
        let category_id = self
            .category_id
            .ok_or_else(|| AppError::Validation("Choose a category".into()))?;
        let category = categories::get_category(conn, category_id)?
            .ok_or_else(|| AppError::Validation(format!("Unknown category {}", category_id)))?;

        let transaction_type = match self.transaction_type.as_deref() {
            Some(value) => TransactionType::parse(value)
                .ok_or_else(|| AppError::Validation(format!("Unknown type '{}'", value)))?,
            None => category.category_type,
        };

        let amount = parse_amount(&self.amount)?;
        let date = match self.date.as_deref() {
            Some(value) => parse_form_date(value)?,
            None => Local::now().timestamp(),
        };

        Ok(NewTransaction {
            category_id,
            amount,
            date,
            description: self.description.trim().to_string(),
            transaction_type,
        })
    }
}

fn parse_amount(raw: &str) -> AppResult<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid amount '{}'", raw.trim())))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::Validation(
            "Amount must be a non-negative number".into(),
        ));
    }
    Ok(amount)
}

/// Noon local time on the given day, as unix seconds. Noon keeps the
/// timestamp inside the day whatever the DST transition.
fn parse_form_date(raw: &str) -> AppResult<i64> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}'", raw)))?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid date '{}'", raw)))?;
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::Validation(format!("Invalid date '{}'", raw)))
}

fn redirect_to_month(month: MonthCursor) -> Redirect {
    Redirect::to(&format!("/?month={}", month.query_value()))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TransactionFormData>,
) -> AppResult<Redirect> {
    let month = state.resolve_month(form.month.as_deref())?;
    debug!(amount = %form.amount, month = %month, "Creating transaction");

    let mut conn = state.db.get()?;
    let new_transaction = form.to_new_transaction(&conn)?;
    let (id, snapshot) = ledger::insert_and_refresh(&mut conn, &new_transaction, month)?;
    info!(
        transaction_id = id,
        total = snapshot.transactions.len(),
        "Transaction created via web form"
    );

    Ok(redirect_to_month(month))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteFormData {
    pub month: Option<String>,
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteFormData>,
) -> AppResult<Redirect> {
    let month = state.resolve_month(form.month.as_deref())?;
    let mut conn = state.db.get()?;
    let (rows, snapshot) = ledger::delete_and_refresh(&mut conn, id, month)?;
    info!(
        transaction_id = id,
        rows,
        total = snapshot.transactions.len(),
        "Transaction deleted via web form"
    );

    Ok(redirect_to_month(month))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<MonthParams>,
) -> AppResult<Html<String>> {
    let month = state.resolve_month(params.month.as_deref())?;
    let mut conn = state.db.get()?;
    let (rows, snapshot) = ledger::delete_and_refresh(&mut conn, id, month)?;
    debug!(
        transaction_id = id,
        rows,
        total = snapshot.transactions.len(),
        "Transaction deleted"
    );

    Ok(Html(String::new()))
}
