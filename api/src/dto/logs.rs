use serde::{Deserialize, Serialize};

/// `?limit=N`, clamped to 1..=500 by the logs service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}
