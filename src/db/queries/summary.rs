use crate::date_utils::MonthWindow;
use crate::models::summary::TransactionsByMonth;
use rusqlite::{params, Connection};
use tracing::debug;

/// Income and expense totals for rows with `start <= date <= end`.
///
/// Rows are bucketed by their `type` text, not by the sign of `amount`.
pub fn totals_between(
    conn: &Connection,
    start: i64,
    end: i64,
) -> rusqlite::Result<TransactionsByMonth> {
    let totals = conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN type = 'Expense' THEN amount ELSE 0 END), 0) AS total_expenses,
            COALESCE(SUM(CASE WHEN type = 'Income' THEN amount ELSE 0 END), 0) AS total_income
         FROM Transactions
         WHERE date >= ? AND date <= ?",
        params![start, end],
        |row| {
            Ok(TransactionsByMonth {
                total_expenses: row.get(0)?,
                total_income: row.get(1)?,
            })
        },
    )?;

    debug!(
        start,
        end,
        total_income = totals.total_income,
        total_expenses = totals.total_expenses,
        "Computed totals"
    );
    Ok(totals)
}

pub fn monthly_totals(
    conn: &Connection,
    window: &MonthWindow,
) -> rusqlite::Result<TransactionsByMonth> {
    totals_between(conn, window.start, window.end)
}
