//! Pagination parameters.

use serde::{Deserialize, Serialize};

/// Offset pagination shared by paginated list endpoints.
///
/// - `page`: ≥ 1, default 1
/// - `limit`: ≥ 1, default 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    3
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// `(page - 1) * limit`. Negative when `page < 1`; callers validate first.
    /// `None` when the product does not fit in an `i64`: no row sits that far.
    pub fn offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.limit)
    }

    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.limit >= 1
    }
}
