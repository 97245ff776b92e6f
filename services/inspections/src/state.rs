use crate::infra::StoreBackend;
use crate::infra::password::Pbkdf2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreBackend,
    pub hasher: Pbkdf2Hasher,
    /// Base of `Location` headers, without a trailing slash.
    pub public_url: String,
}

impl AppState {
    pub fn store(&self) -> StoreBackend {
        self.store.clone()
    }

    pub fn hasher(&self) -> Pbkdf2Hasher {
        self.hasher
    }

    pub fn location(&self, path: &str, id: i32) -> String {
        format!("{}{path}/{id}", self.public_url)
    }
}
