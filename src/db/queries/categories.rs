use crate::models::category::Category;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: row.get(2)?,
        icon: row.get(3)?,
    })
}

/// All categories, in whatever order SQLite returns them.
pub fn list_categories(conn: &Connection) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, type, icon FROM Categories")?;

    let categories = stmt
        .query_map([], category_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = categories.len(), "Listed categories");
    Ok(categories)
}

pub fn get_category(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name, type, icon FROM Categories WHERE id = ?",
        [id],
        category_from_row,
    )
    .optional()
}
