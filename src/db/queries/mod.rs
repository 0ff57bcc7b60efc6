pub mod categories;
pub mod summary;
pub mod transactions;
