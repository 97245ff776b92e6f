use anyhow::Context as _;
use sea_orm::Database;
use tracing::{info, warn};

use leakwatch_core::tracing::init_tracing;
use leakwatch_inspections::config::InspectionsConfig;
use leakwatch_inspections::infra::StoreBackend;
use leakwatch_inspections::infra::db::DbStore;
use leakwatch_inspections::infra::memory::MemoryStore;
use leakwatch_inspections::infra::password::Pbkdf2Hasher;
use leakwatch_inspections::router::build_router;
use leakwatch_inspections::state::AppState;
use leakwatch_inspections_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = InspectionsConfig::from_env()?;
    init_tracing(config.log_format);

    let store = match &config.database_url {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("failed to connect to database")?;
            if config.auto_migrate {
                Migrator::up(&db, None)
                    .await
                    .context("failed to run migrations")?;
                info!("migrations applied");
            }
            info!(backend = "postgres", "store ready");
            StoreBackend::Db(DbStore::new(db))
        }
        None => {
            warn!(backend = "memory", "DATABASE_URL is unset, data will not persist");
            StoreBackend::Memory(MemoryStore::new())
        }
    };

    let state = AppState {
        store,
        hasher: Pbkdf2Hasher::new(config.password_hash_iterations),
        public_url: config.public_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("inspections service listening on {addr}");
    axum::serve(listener, router).await.context("server error")
}
