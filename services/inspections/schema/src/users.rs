use sea_orm::entity::prelude::*;

/// Inspector account. `password` holds the PBKDF2 hash, never the plain text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub agency_id: Option<i32>,
    #[sea_orm(unique)]
    pub email: String,
    pub roles: Json,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::agencies::Entity",
        from = "Column::AgencyId",
        to = "super::agencies::Column::Id",
        on_delete = "SetNull"
    )]
    Agency,
    #[sea_orm(has_many = "super::campaigns::Entity")]
    Campaigns,
    #[sea_orm(has_many = "super::gaz::Entity")]
    Gaz,
    #[sea_orm(has_many = "super::severities::Entity")]
    Severities,
    #[sea_orm(has_many = "super::leak_statuses::Entity")]
    LeakStatuses,
    #[sea_orm(has_many = "super::leaks::Entity")]
    Leaks,
}

impl Related<super::agencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agency.def()
    }
}

impl Related<super::campaigns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaigns.def()
    }
}

impl Related<super::gaz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gaz.def()
    }
}

impl Related<super::severities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Severities.def()
    }
}

impl Related<super::leak_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeakStatuses.def()
    }
}

impl Related<super::leaks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leaks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
