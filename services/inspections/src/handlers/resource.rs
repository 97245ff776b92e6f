//! CRUD handlers shared by every resource. Each route instantiates them with
//! the record type, e.g. `get(list::<Agency>)`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::domain::record::{Record, Resource};
use crate::domain::repository::Repository;
use crate::error::InspectionsError;
use crate::infra::StoreBackend;
use crate::state::AppState;
use crate::usecase::projection::ProjectUseCase;
use crate::usecase::resource::{
    CreateUseCase, DeleteUseCase, GetUseCase, ListUseCase, UpdateUseCase,
};

// ── GET /api/<resource> ──────────────────────────────────────────────────────

pub async fn list<T>(State(state): State<AppState>) -> Result<Json<Vec<Value>>, InspectionsError>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    let usecase = ListUseCase {
        store: state.store(),
    };
    let records = usecase.execute::<T>().await?;
    let project = ProjectUseCase {
        store: state.store(),
    };
    Ok(Json(project.execute(&records, T::VIEW).await?))
}

// ── GET /api/<resource>/{id} ─────────────────────────────────────────────────

pub async fn get_one<T>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, InspectionsError>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    let usecase = GetUseCase {
        store: state.store(),
    };
    let record = usecase.execute::<T>(id).await?;
    let project = ProjectUseCase {
        store: state.store(),
    };
    Ok(Json(project.execute_one(&record, T::VIEW).await?))
}

// ── POST /api/<resource> ─────────────────────────────────────────────────────

pub async fn create<T>(
    State(state): State<AppState>,
    Json(payload): Json<T::Payload>,
) -> Result<Response, InspectionsError>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    let usecase = CreateUseCase {
        store: state.store(),
        hasher: state.hasher(),
    };
    let record = usecase.execute::<T>(payload).await?;
    let id = record
        .id()
        .ok_or_else(|| anyhow::anyhow!("{} saved without id", T::TABLE.name()))?;
    let project = ProjectUseCase {
        store: state.store(),
    };
    let body = project.execute_one(&record, T::VIEW).await?;
    let location = state.location(T::PATH, id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

// ── PUT /api/<resource>/{id} ─────────────────────────────────────────────────

pub async fn update<T>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<T::Payload>,
) -> Result<StatusCode, InspectionsError>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    let usecase = UpdateUseCase {
        store: state.store(),
        hasher: state.hasher(),
    };
    usecase.execute::<T>(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/<resource>/{id} ──────────────────────────────────────────────

pub async fn delete<T>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, InspectionsError>
where
    T: Resource,
    StoreBackend: Repository<T>,
{
    let usecase = DeleteUseCase {
        store: state.store(),
    };
    usecase.execute::<T>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
