use serde::{Deserialize, Serialize};

use super::TransactionType;

/// A seeded label applied to transactions. There is no API to change these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub icon: String,
}

impl Category {
    pub fn display_name(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.icon)
        }
    }
}
