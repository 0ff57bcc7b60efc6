use serde::Serialize;

/// Income and expense totals for one month window. Recomputed on every
/// refresh, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TransactionsByMonth {
    pub total_expenses: f64,
    pub total_income: f64,
}

impl TransactionsByMonth {
    pub fn savings(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

impl std::ops::Add for TransactionsByMonth {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_expenses: self.total_expenses + rhs.total_expenses,
            total_income: self.total_income + rhs.total_income,
        }
    }
}

impl std::iter::Sum for TransactionsByMonth {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, t| acc + t)
    }
}
