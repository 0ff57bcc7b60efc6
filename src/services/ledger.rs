//! Unit-of-work wrappers around the ledger queries.
//!
//! Every logical operation runs inside one SQLite transaction, and every
//! mutation is followed by a full re-fetch of what the home page shows.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

use crate::date_utils::{MonthCursor, MonthWindow};
use crate::db::queries::{categories, summary, transactions};
use crate::error::AppResult;
use crate::models::{Category, NewTransaction, Transaction, TransactionsByMonth};

/// Everything the home page renders for one month.
#[derive(Debug, Clone, Serialize)]
pub struct HomeSnapshot {
    pub month: MonthCursor,
    pub window: MonthWindow,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub totals: TransactionsByMonth,
}

impl HomeSnapshot {
    pub fn category_names(&self) -> HashMap<i64, &str> {
        self.categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect()
    }
}

/// Read the transaction list, categories, and totals for `month`.
pub fn fetch_snapshot(conn: &mut Connection, month: MonthCursor) -> AppResult<HomeSnapshot> {
    fetch_snapshot_in(conn, month, month.window())
}

/// Same as [`fetch_snapshot`] with an explicit window, for callers that
/// compute it in a time zone other than the local one.
pub fn fetch_snapshot_in(
    conn: &mut Connection,
    month: MonthCursor,
    window: MonthWindow,
) -> AppResult<HomeSnapshot> {
    let tx = conn.transaction()?;
    let snapshot = read_snapshot(&tx, month, window)?;
    tx.commit()?;
    Ok(snapshot)
}

/// Insert `new` and return its id together with a fresh snapshot.
pub fn insert_and_refresh(
    conn: &mut Connection,
    new: &NewTransaction,
    month: MonthCursor,
) -> AppResult<(i64, HomeSnapshot)> {
    let tx = conn.transaction()?;
    let id = transactions::create_transaction(&tx, new)?;
    let snapshot = read_snapshot(&tx, month, month.window())?;
    tx.commit()?;

    info!(transaction_id = id, month = %month, "Transaction recorded");
    Ok((id, snapshot))
}

/// Delete transaction `id` and return the affected row count together with a
/// fresh snapshot. An unknown id affects zero rows and is not an error.
pub fn delete_and_refresh(
    conn: &mut Connection,
    id: i64,
    month: MonthCursor,
) -> AppResult<(usize, HomeSnapshot)> {
    let tx = conn.transaction()?;
    let rows = transactions::delete_transaction(&tx, id)?;
    let snapshot = read_snapshot(&tx, month, month.window())?;
    tx.commit()?;

    info!(transaction_id = id, rows, month = %month, "Transaction deleted");
    Ok((rows, snapshot))
}

fn read_snapshot(
    conn: &Connection,
    month: MonthCursor,
    window: MonthWindow,
) -> AppResult<HomeSnapshot> {
    let transactions = transactions::list_transactions(conn)?;
    let categories = categories::list_categories(conn)?;
    let totals = summary::monthly_totals(conn, &window)?;

    debug!(
        month = %month,
        transactions = transactions.len(),
        categories = categories.len(),
        "Snapshot loaded"
    );

    Ok(HomeSnapshot {
        month,
        window,
        transactions,
        categories,
        totals,
    })
}
