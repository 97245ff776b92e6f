use chrono::Utc;

use leakwatch_domain::validation::{FieldValue, Violation, unique_constraints, validate};

use crate::domain::agency::Agency;
use crate::domain::campaign::Campaign;
use crate::domain::catalog::{Gaz, LeakStatus, Severity};
use crate::domain::leak::Leak;
use crate::domain::record::{Link, Record, Resource, Table};
use crate::domain::repository::{PasswordHasher, Repository, Store};
use crate::domain::user::User;
use crate::error::InspectionsError;

/// Set each linked foreign key to the requested id when that row exists, and
/// unset it otherwise.
async fn attach<T, S>(store: &S, record: &mut T, links: &[Link]) -> Result<(), InspectionsError>
where
    T: Resource,
    S: Store,
{
    for link in links {
        let resolved = match link.requested.get() {
            Some(id) => exists(store, link.target, id).await?.then_some(id),
            None => None,
        };
        record.set_foreign_key(link.field, resolved);
    }
    Ok(())
}

async fn exists<S: Store>(store: &S, table: Table, id: i32) -> Result<bool, InspectionsError> {
    let found = match table {
        Table::Agencies => Repository::<Agency>::find_by_id(store, id).await?.is_some(),
        Table::Users => Repository::<User>::find_by_id(store, id).await?.is_some(),
        Table::Campaigns => Repository::<Campaign>::find_by_id(store, id).await?.is_some(),
        Table::Gaz => Repository::<Gaz>::find_by_id(store, id).await?.is_some(),
        Table::Severities => Repository::<Severity>::find_by_id(store, id).await?.is_some(),
        Table::LeakStatuses => Repository::<LeakStatus>::find_by_id(store, id).await?.is_some(),
        Table::Leaks => Repository::<Leak>::find_by_id(store, id).await?.is_some(),
    };
    Ok(found)
}

/// Run the rule table, then the uniqueness rules against the store. A field
/// that already failed a local rule is not checked for uniqueness.
async fn check<T, S>(store: &S, record: &T) -> Result<(), InspectionsError>
where
    T: Resource,
    S: Repository<T>,
{
    let mut violations = validate(T::RULES, |field| record.field(field));
    for (field, column, message) in unique_constraints(T::RULES) {
        if violations.iter().any(|v| v.property_path == field) {
            continue;
        }
        let FieldValue::Text(Some(value)) = record.field(field) else {
            continue;
        };
        let taken = Repository::<T>::find_by_text(store, column, value)
            .await?
            .iter()
            .any(|other| other.id() != record.id());
        if taken {
            violations.push(Violation::new(field, message));
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(InspectionsError::Validation(violations))
    }
}

// ── List ─────────────────────────────────────────────────────────────────────

pub struct ListUseCase<S: Store> {
    pub store: S,
}

impl<S: Store> ListUseCase<S> {
    pub async fn execute<T>(&self) -> Result<Vec<T>, InspectionsError>
    where
        T: Resource,
        S: Repository<T>,
    {
        Repository::<T>::find_all(&self.store).await
    }
}

// ── Get ──────────────────────────────────────────────────────────────────────

pub struct GetUseCase<S: Store> {
    pub store: S,
}

impl<S: Store> GetUseCase<S> {
    pub async fn execute<T>(&self, id: i32) -> Result<T, InspectionsError>
    where
        T: Resource,
        S: Repository<T>,
    {
        Repository::<T>::find_by_id(&self.store, id)
            .await?
            .ok_or(InspectionsError::NotFound(T::TABLE.resource()))
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

pub struct CreateUseCase<S: Store, H: PasswordHasher> {
    pub store: S,
    pub hasher: H,
}

impl<S: Store, H: PasswordHasher> CreateUseCase<S, H> {
    pub async fn execute<T>(&self, payload: T::Payload) -> Result<T, InspectionsError>
    where
        T: Resource,
        S: Repository<T>,
    {
        let mut record = T::blank(Utc::now());
        let links = record.apply(payload);
        attach(&self.store, &mut record, &links).await?;
        check(&self.store, &record).await?;
        record.secure(&self.hasher);
        Repository::<T>::save(&self.store, record).await
    }
}

// ── Update ───────────────────────────────────────────────────────────────────

pub struct UpdateUseCase<S: Store, H: PasswordHasher> {
    pub store: S,
    pub hasher: H,
}

impl<S: Store, H: PasswordHasher> UpdateUseCase<S, H> {
    /// Overwrite the fields present in `payload` and re-resolve every companion id.
    pub async fn execute<T>(&self, id: i32, payload: T::Payload) -> Result<T, InspectionsError>
    where
        T: Resource,
        S: Repository<T>,
    {
        let mut record = Repository::<T>::find_by_id(&self.store, id)
            .await?
            .ok_or(InspectionsError::NotFound(T::TABLE.resource()))?;
        let links = record.apply(payload);
        attach(&self.store, &mut record, &links).await?;
        record.touch(Utc::now());
        check(&self.store, &record).await?;
        record.secure(&self.hasher);
        Repository::<T>::save(&self.store, record).await
    }
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub struct DeleteUseCase<S: Store> {
    pub store: S,
}

impl<S: Store> DeleteUseCase<S> {
    pub async fn execute<T>(&self, id: i32) -> Result<(), InspectionsError>
    where
        T: Resource,
        S: Repository<T>,
    {
        if Repository::<T>::delete(&self.store, id).await? {
            Ok(())
        } else {
            Err(InspectionsError::NotFound(T::TABLE.resource()))
        }
    }
}
