pub mod db;
pub mod memory;
pub mod password;

use leakwatch_domain::pagination::PageRequest;

use crate::domain::record::Record;
use crate::domain::repository::Repository;
use crate::error::InspectionsError;
use crate::infra::db::DbStore;
use crate::infra::memory::MemoryStore;

/// The configured persistence backend.
#[derive(Clone)]
pub enum StoreBackend {
    Db(DbStore),
    Memory(MemoryStore),
}

impl StoreBackend {
    /// Readiness probe. The memory backend is always ready.
    pub async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Db(store) => store.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            Self::Db(store) => Repository::<T>::$method(store, $($arg),*).await,
            Self::Memory(store) => Repository::<T>::$method(store, $($arg),*).await,
        }
    };
}

impl<T> Repository<T> for StoreBackend
where
    T: Record,
    DbStore: Repository<T>,
    MemoryStore: Repository<T>,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, InspectionsError> {
        dispatch!(self, find_by_id(id))
    }

    async fn find_all(&self) -> Result<Vec<T>, InspectionsError> {
        dispatch!(self, find_all())
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<T>, InspectionsError> {
        dispatch!(self, find_page(page))
    }

    async fn find_by_keys(&self, field: &str, keys: &[i32]) -> Result<Vec<T>, InspectionsError> {
        dispatch!(self, find_by_keys(field, keys))
    }

    async fn find_by_text(&self, field: &str, value: &str) -> Result<Vec<T>, InspectionsError> {
        dispatch!(self, find_by_text(field, value))
    }

    async fn save(&self, record: T) -> Result<T, InspectionsError> {
        dispatch!(self, save(record))
    }

    async fn delete(&self, id: i32) -> Result<bool, InspectionsError> {
        dispatch!(self, delete(id))
    }
}
