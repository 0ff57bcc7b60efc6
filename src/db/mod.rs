pub mod bootstrap;
pub mod pool;
pub mod queries;
pub mod seed;

pub use bootstrap::{ensure_database, BootstrapOutcome, SeedSource};
pub use pool::{create_in_memory_pool, create_pool, DbPool};
