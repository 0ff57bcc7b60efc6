use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Direction of a money movement, stored as the text `'Income'` / `'Expense'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Income" => Some(TransactionType::Income),
            "Expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[TransactionType::Expense, TransactionType::Income]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TransactionType::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown transaction type: {s}").into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub category_id: i64,
    pub amount: f64,
    /// Unix timestamp in whole seconds.
    pub date: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Calendar date of the transaction in the local time zone, for display.
    pub fn date_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.date, 0)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .unwrap_or_default()
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    pub category_id: i64,
    pub amount: f64,
    pub date: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}
