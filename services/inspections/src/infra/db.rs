use std::str::FromStr;

use anyhow::{Context as _, anyhow};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use leakwatch_domain::pagination::PageRequest;
use leakwatch_inspections_schema::{
    agencies, campaigns, gaz, leak_statuses, leaks, severities, users,
};

use crate::domain::agency::Agency;
use crate::domain::campaign::Campaign;
use crate::domain::catalog::{Gaz, LeakStatus, Severity};
use crate::domain::leak::Leak;
use crate::domain::record::Record;
use crate::domain::repository::Repository;
use crate::domain::user::User;
use crate::error::InspectionsError;

/// PostgreSQL store. On-delete rules are enforced by the foreign keys.
#[derive(Clone)]
pub struct DbStore {
    pub db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await.context("ping database")
    }
}

/// Mapping between a domain record and its sea-orm entity.
pub trait DbRecord: Record {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> Self;
    fn to_active_model(&self) -> Self::ActiveModel;
}

fn column<E: EntityTrait>(field: &str) -> anyhow::Result<E::Column> {
    E::Column::from_str(field).map_err(|_| anyhow!("unknown column {field}"))
}

impl<T> Repository<T> for DbStore
where
    T: DbRecord,
    <T::Entity as EntityTrait>::Model: IntoActiveModel<T::ActiveModel>,
    <<T::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, InspectionsError> {
        let model = T::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .with_context(|| format!("find {} by id", T::TABLE.name()))?;
        Ok(model.map(T::from_model))
    }

    async fn find_all(&self) -> Result<Vec<T>, InspectionsError> {
        let models = T::Entity::find()
            .order_by_asc(column::<T::Entity>("id")?)
            .all(&self.db)
            .await
            .with_context(|| format!("list {}", T::TABLE.name()))?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<T>, InspectionsError> {
        let Some(offset) = page.offset() else {
            return Ok(Vec::new());
        };
        let offset = u64::try_from(offset.max(0)).unwrap_or(0);
        let limit = u64::try_from(page.limit).unwrap_or(0);
        let models = T::Entity::find()
            .order_by_asc(column::<T::Entity>("id")?)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .with_context(|| format!("page {}", T::TABLE.name()))?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn find_by_keys(&self, field: &str, keys: &[i32]) -> Result<Vec<T>, InspectionsError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let models = T::Entity::find()
            .filter(column::<T::Entity>(field)?.is_in(keys.iter().copied()))
            .order_by_asc(column::<T::Entity>("id")?)
            .all(&self.db)
            .await
            .with_context(|| format!("find {} by {field}", T::TABLE.name()))?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn find_by_text(&self, field: &str, value: &str) -> Result<Vec<T>, InspectionsError> {
        let models = T::Entity::find()
            .filter(column::<T::Entity>(field)?.eq(value))
            .order_by_asc(column::<T::Entity>("id")?)
            .all(&self.db)
            .await
            .with_context(|| format!("find {} by {field}", T::TABLE.name()))?;
        Ok(models.into_iter().map(T::from_model).collect())
    }

    async fn save(&self, record: T) -> Result<T, InspectionsError> {
        let am = record.to_active_model();
        let model = match record.id() {
            Some(_) => am
                .update(&self.db)
                .await
                .with_context(|| format!("update {}", T::TABLE.name()))?,
            None => am
                .insert(&self.db)
                .await
                .with_context(|| format!("insert {}", T::TABLE.name()))?,
        };
        Ok(T::from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, InspectionsError> {
        let result = T::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .with_context(|| format!("delete {}", T::TABLE.name()))?;
        Ok(result.rows_affected > 0)
    }
}

// ── Agency ───────────────────────────────────────────────────────────────────

impl DbRecord for Agency {
    type Entity = agencies::Entity;
    type ActiveModel = agencies::ActiveModel;

    fn from_model(model: agencies::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> agencies::ActiveModel {
        agencies::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            name: Set(self.name.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

// ── User ─────────────────────────────────────────────────────────────────────

impl DbRecord for User {
    type Entity = users::Entity;
    type ActiveModel = users::ActiveModel;

    fn from_model(model: users::Model) -> Self {
        Self {
            id: Some(model.id),
            agency_id: model.agency_id,
            email: model.email,
            roles: model.roles,
            password: model.password,
            plain_password: None,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> users::ActiveModel {
        users::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            agency_id: Set(self.agency_id),
            email: Set(self.email.clone()),
            roles: Set(self.roles.clone()),
            password: Set(self.password.clone()),
            first_name: Set(self.first_name.clone()),
            last_name: Set(self.last_name.clone()),
            phone_number: Set(self.phone_number.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

// ── Campaign ─────────────────────────────────────────────────────────────────

impl DbRecord for Campaign {
    type Entity = campaigns::Entity;
    type ActiveModel = campaigns::ActiveModel;

    fn from_model(model: campaigns::Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            society_name: model.society_name,
            location: model.location,
            kwh_price: model.kwh_price,
            nbr_compressor_use_by_year: model.nbr_compressor_use_by_year,
            electricity_price: model.electricity_price,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> campaigns::ActiveModel {
        campaigns::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            user_id: Set(self.user_id),
            society_name: Set(self.society_name.clone()),
            location: Set(self.location.clone()),
            kwh_price: Set(self.kwh_price),
            nbr_compressor_use_by_year: Set(self.nbr_compressor_use_by_year),
            electricity_price: Set(self.electricity_price),
            description: Set(self.description.clone()),
            is_active: Set(self.is_active),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

impl DbRecord for Gaz {
    type Entity = gaz::Entity;
    type ActiveModel = gaz::ActiveModel;

    fn from_model(model: gaz::Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            gaz_name: model.gaz_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> gaz::ActiveModel {
        gaz::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            user_id: Set(self.user_id),
            gaz_name: Set(self.gaz_name.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

impl DbRecord for Severity {
    type Entity = severities::Entity;
    type ActiveModel = severities::ActiveModel;

    fn from_model(model: severities::Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            severity_name: model.severity_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> severities::ActiveModel {
        severities::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            user_id: Set(self.user_id),
            severity_name: Set(self.severity_name.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

impl DbRecord for LeakStatus {
    type Entity = leak_statuses::Entity;
    type ActiveModel = leak_statuses::ActiveModel;

    fn from_model(model: leak_statuses::Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            status_name: model.status_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> leak_statuses::ActiveModel {
        leak_statuses::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            user_id: Set(self.user_id),
            status_name: Set(self.status_name.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

// ── Leak ─────────────────────────────────────────────────────────────────────

impl DbRecord for Leak {
    type Entity = leaks::Entity;
    type ActiveModel = leaks::ActiveModel;

    fn from_model(model: leaks::Model) -> Self {
        Self {
            id: Some(model.id),
            user_id: model.user_id,
            campaign_id: model.campaign_id,
            lm_status_id: model.lm_status_id,
            severity_id: model.severity_id,
            leak_location: model.leak_location,
            leak_description: model.leak_description,
            leak_image_big: model.leak_image_big,
            leak_image_small: model.leak_image_small,
            leak_number: model.leak_number,
            measured_flow: model.measured_flow,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(&self) -> leaks::ActiveModel {
        leaks::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            user_id: Set(self.user_id),
            campaign_id: Set(self.campaign_id),
            lm_status_id: Set(self.lm_status_id),
            severity_id: Set(self.severity_id),
            leak_location: Set(self.leak_location.clone()),
            leak_description: Set(self.leak_description.clone()),
            leak_image_big: Set(self.leak_image_big.clone()),
            leak_image_small: Set(self.leak_image_small.clone()),
            leak_number: Set(self.leak_number),
            measured_flow: Set(self.measured_flow),
            comment: Set(self.comment.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}
