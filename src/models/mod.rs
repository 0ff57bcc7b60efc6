pub mod category;
pub mod summary;
pub mod transaction;

pub use category::Category;
pub use summary::TransactionsByMonth;
pub use transaction::{NewTransaction, Transaction, TransactionType};
