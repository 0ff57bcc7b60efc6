use crate::models::transaction::{NewTransaction, Transaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, trace};

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        transaction_type: row.get(5)?,
    })
}

/// Every transaction, newest first. Rows sharing a timestamp come back in
/// reverse insertion order.
pub fn list_transactions(conn: &Connection) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, category_id, amount, date, description, type
         FROM Transactions
         ORDER BY date DESC, id DESC",
    )?;

    let transactions = stmt
        .query_map([], transaction_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

pub fn get_transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    trace!(transaction_id = id, "Fetching transaction");
    conn.query_row(
        "SELECT id, category_id, amount, date, description, type
         FROM Transactions WHERE id = ?",
        [id],
        transaction_from_row,
    )
    .optional()
}

/// Insert a transaction and return its generated id. The sign of `amount` is
/// stored as given; it is not checked against the type.
pub fn create_transaction(
    conn: &Connection,
    transaction: &NewTransaction,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO Transactions (category_id, amount, date, description, type)
         VALUES (?, ?, ?, ?, ?)",
        params![
            transaction.category_id,
            transaction.amount,
            transaction.date,
            transaction.description,
            transaction.transaction_type,
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        transaction_id = id,
        amount = transaction.amount,
        kind = %transaction.transaction_type,
        "Created transaction"
    );
    Ok(id)
}

/// Delete by id, returning the number of rows removed (0 for an unknown id).
pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    let rows = conn.execute("DELETE FROM Transactions WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(transaction_id = id, "Deleted transaction");
    } else {
        debug!(transaction_id = id, "No transaction to delete");
    }
    Ok(rows)
}
