use crate::config::Config;
use crate::date_utils::MonthCursor;
use crate::db::DbPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Resolve the `month` query parameter, falling back to the configured
    /// start month and then to the current month.
    pub fn resolve_month(
        &self,
        requested: Option<&str>,
    ) -> Result<MonthCursor, crate::date_utils::InvalidMonth> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => value.parse(),
            None => Ok(self.config.default_month()),
        }
    }
}
