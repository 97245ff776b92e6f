use axum::{
    Router,
    routing::{get, post},
};

use leakwatch_core::health::healthz;
use leakwatch_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::domain::agency::Agency;
use crate::domain::campaign::Campaign;
use crate::domain::catalog::{Gaz, LeakStatus, Severity};
use crate::domain::leak::Leak;
use crate::domain::record::Resource;
use crate::domain::repository::Repository;
use crate::domain::user::User;
use crate::handlers::campaign::{list_campaigns, toggle_campaign};
use crate::handlers::health::readyz;
use crate::handlers::resource::{create, delete, get_one, list, update};
use crate::infra::StoreBackend;
use crate::state::AppState;

/// `GET`/`POST` on the collection and `GET`/`PUT`/`DELETE` on `{id}`.
fn resource<T>(router: Router<AppState>) -> Router<AppState>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    router
        .route(T::PATH, get(list::<T>).post(create::<T>))
        .route(
            &format!("{}/{{id}}", T::PATH),
            get(get_one::<T>).put(update::<T>).delete(delete::<T>),
        )
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Campaigns: paginated list and activation toggle
        .route(
            Campaign::PATH,
            get(list_campaigns).post(create::<Campaign>),
        )
        .route(
            &format!("{}/{{id}}", Campaign::PATH),
            get(get_one::<Campaign>)
                .put(update::<Campaign>)
                .delete(delete::<Campaign>),
        )
        .route("/api/campaigns/state/{id}", post(toggle_campaign));
    let router = resource::<Agency>(router);
    let router = resource::<User>(router);
    let router = resource::<Gaz>(router);
    let router = resource::<Severity>(router);
    let router = resource::<LeakStatus>(router);
    let router = resource::<Leak>(router);
    router
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
