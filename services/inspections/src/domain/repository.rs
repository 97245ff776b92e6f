use std::future::Future;

use leakwatch_domain::pagination::PageRequest;

use crate::domain::agency::Agency;
use crate::domain::campaign::Campaign;
use crate::domain::catalog::{Gaz, LeakStatus, Severity};
use crate::domain::leak::Leak;
use crate::domain::record::Record;
use crate::domain::user::User;
use crate::error::InspectionsError;

/// Persistence for one record type.
///
/// Rows are returned in id order. `field` arguments are storage column names.
/// Futures are `Send` so generic handlers stay `Send`.
pub trait Repository<T: Record>: Send + Sync {
    fn find_by_id(&self, id: i32)
    -> impl Future<Output = Result<Option<T>, InspectionsError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, InspectionsError>> + Send;

    /// One page at `page.offset()`. A negative offset is treated as 0, an
    /// overflowing one yields no rows.
    fn find_page(&self, page: PageRequest)
    -> impl Future<Output = Result<Vec<T>, InspectionsError>> + Send;

    /// Rows whose `field` is one of `keys`. Used for `id` lookups and
    /// reverse foreign-key collections.
    fn find_by_keys(&self, field: &str, keys: &[i32])
    -> impl Future<Output = Result<Vec<T>, InspectionsError>> + Send;

    fn find_by_text(&self, field: &str, value: &str)
    -> impl Future<Output = Result<Vec<T>, InspectionsError>> + Send;

    /// Insert when the record has no id, update otherwise. Returns the stored row.
    fn save(&self, record: T) -> impl Future<Output = Result<T, InspectionsError>> + Send;

    /// Delete a row and apply its on-delete rules. Returns `true` if a row was deleted.
    fn delete(&self, id: i32) -> impl Future<Output = Result<bool, InspectionsError>> + Send;
}

/// A backend able to persist every entity.
pub trait Store:
    Repository<Agency>
    + Repository<User>
    + Repository<Campaign>
    + Repository<Gaz>
    + Repository<Severity>
    + Repository<LeakStatus>
    + Repository<Leak>
{
}

impl<S> Store for S where
    S: Repository<Agency>
        + Repository<User>
        + Repository<Campaign>
        + Repository<Gaz>
        + Repository<Severity>
        + Repository<LeakStatus>
        + Repository<Leak>
{
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> String;
}
